//! Dispatcher configuration from TOML (`[dispatcher]` section)

use serde::{Deserialize, Serialize};

/// Default orchestrator address
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";
/// Default request-processing endpoint
pub const DEFAULT_PROCESS_PATH: &str = "/api/v1/process";
/// Default per-request timeout in seconds
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 300;

/// Raw dispatcher configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileDispatcherConfig {
    /// Base URL of the request-processing orchestrator
    pub base_url: String,
    /// Path of the endpoint that processes a single request
    pub process_path: String,
    /// Timeout for one delegated request (`None` = wait indefinitely)
    pub timeout_seconds: Option<u64>,
}

impl Default for FileDispatcherConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            process_path: DEFAULT_PROCESS_PATH.to_string(),
            timeout_seconds: Some(DEFAULT_TIMEOUT_SECONDS),
        }
    }
}
