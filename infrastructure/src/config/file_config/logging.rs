//! Logging configuration from TOML (`[logging]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw logging configuration from TOML
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// JSONL transcript of every delegation (disabled when unset)
    pub delegation_log: Option<PathBuf>,
    /// Directory for the diagnostic log file (stderr only when unset)
    pub log_dir: Option<PathBuf>,
}
