//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod dispatcher;
mod logging;
mod output;
mod workflow;

pub use dispatcher::{
    DEFAULT_BASE_URL, DEFAULT_PROCESS_PATH, DEFAULT_TIMEOUT_SECONDS, FileDispatcherConfig,
};
pub use logging::FileLoggingConfig;
pub use output::{FileOutputConfig, FileOutputFormat};
pub use workflow::{DEFAULT_PLAN_FILE, FileWorkflowConfig};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigValidationError {
    #[error("dispatcher.base_url cannot be empty")]
    EmptyBaseUrl,

    #[error("dispatcher.base_url must start with http:// or https:// (got '{0}')")]
    UnsupportedScheme(String),

    #[error("dispatcher.process_path must start with '/' (got '{0}')")]
    InvalidProcessPath(String),

    #[error("dispatcher.timeout_seconds cannot be 0")]
    InvalidTimeout,

    #[error("workflow.default_user_id cannot be empty")]
    EmptyDefaultUser,
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Orchestrator connection settings
    pub dispatcher: FileDispatcherConfig,
    /// Workflow defaults
    pub workflow: FileWorkflowConfig,
    /// Output settings
    pub output: FileOutputConfig,
    /// Log destinations
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning every detected issue.
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut issues = Vec::new();

        let base_url = self.dispatcher.base_url.trim();
        if base_url.is_empty() {
            issues.push(ConfigValidationError::EmptyBaseUrl);
        } else if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            issues.push(ConfigValidationError::UnsupportedScheme(
                base_url.to_string(),
            ));
        }

        if !self.dispatcher.process_path.starts_with('/') {
            issues.push(ConfigValidationError::InvalidProcessPath(
                self.dispatcher.process_path.clone(),
            ));
        }

        if self.dispatcher.timeout_seconds == Some(0) {
            issues.push(ConfigValidationError::InvalidTimeout);
        }

        if let Some(user) = &self.workflow.default_user_id
            && user.trim().is_empty()
        {
            issues.push(ConfigValidationError::EmptyDefaultUser);
        }

        issues
    }
}
