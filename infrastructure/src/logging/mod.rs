//! Logging infrastructure: structured delegation logging.
//!
//! Provides [`JsonlDelegationLogger`], a JSONL file writer that implements
//! the [`DelegationLogger`](workflow_application::DelegationLogger) port.

mod jsonl_logger;

pub use jsonl_logger::JsonlDelegationLogger;
