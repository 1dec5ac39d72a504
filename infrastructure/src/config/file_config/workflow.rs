//! Workflow configuration from TOML (`[workflow]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default location of the plan saved between `start` and `execute`
pub const DEFAULT_PLAN_FILE: &str = ".workflow/plan.json";

/// Raw workflow configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileWorkflowConfig {
    /// User id used when `--user` is not given
    pub default_user_id: Option<String>,
    /// Where the CLI keeps the plan between workflow operations
    pub plan_file: PathBuf,
}

impl Default for FileWorkflowConfig {
    fn default() -> Self {
        Self {
            default_user_id: None,
            plan_file: PathBuf::from(DEFAULT_PLAN_FILE),
        }
    }
}
