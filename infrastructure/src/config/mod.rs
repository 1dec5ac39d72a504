//! Configuration file loading for project-workflow
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. Environment: `PROJECT_WORKFLOW_<SECTION>__<KEY>`
//! 2. `--config <path>` specified file
//! 3. Project root: `./workflow.toml` or `./.workflow.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/project-workflow/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, DEFAULT_BASE_URL, DEFAULT_PLAN_FILE, DEFAULT_PROCESS_PATH,
    DEFAULT_TIMEOUT_SECONDS, FileConfig, FileDispatcherConfig, FileLoggingConfig,
    FileOutputConfig, FileOutputFormat, FileWorkflowConfig,
};
pub use loader::ConfigLoader;
