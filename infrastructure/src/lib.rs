//! Infrastructure layer for project-workflow
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, plus configuration loading and plan storage.

pub mod config;
pub mod dispatch;
pub mod logging;
pub mod plan_store;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileConfig, FileDispatcherConfig, FileLoggingConfig,
    FileOutputConfig, FileOutputFormat, FileWorkflowConfig,
};
pub use dispatch::HttpDispatcher;
pub use logging::JsonlDelegationLogger;
pub use plan_store::{PlanFileStore, PlanStoreError};
