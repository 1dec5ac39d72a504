//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure and presentation adapters must implement.

pub mod delegation_logger;
pub mod dispatcher;
pub mod progress;
