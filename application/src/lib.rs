//! Application layer for project-workflow
//!
//! This crate contains the workflow coordinator use case and the port
//! definitions it depends on. It depends only on the domain layer.

pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use ports::{
    delegation_logger::{DelegationEvent, DelegationLogger, NoDelegationLogger},
    dispatcher::{DispatchError, Dispatcher},
    progress::{NoProgress, WorkflowProgressNotifier},
};
pub use use_cases::coordinate_workflow::{WorkflowCoordinator, WorkflowError};
