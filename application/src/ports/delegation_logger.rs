//! Port for structured delegation logging.
//!
//! Records every delegated request and its outcome as a machine-readable
//! transcript (JSONL in the default adapter). This is separate from
//! `tracing`, which carries the human-readable diagnostics.

use serde_json::Value;

/// A structured delegation event for logging.
pub struct DelegationEvent {
    /// Event type identifier ("delegation_sent", "delegation_completed", "delegation_failed").
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl DelegationEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }
}

/// Port for logging delegation events.
///
/// `log` is synchronous and infallible: a broken log must not change the
/// outcome of a workflow operation.
pub trait DelegationLogger: Send + Sync {
    fn log(&self, event: DelegationEvent);
}

/// No-op implementation for tests and when logging is disabled.
pub struct NoDelegationLogger;

impl DelegationLogger for NoDelegationLogger {
    fn log(&self, _event: DelegationEvent) {}
}
