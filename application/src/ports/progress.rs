//! Progress notification port
//!
//! Defines the interface for reporting progress during a workflow operation.

use workflow_domain::WorkflowPhase;

/// Callback for progress updates while delegations run
///
/// Implementations live in the presentation layer.
pub trait WorkflowProgressNotifier: Send + Sync {
    /// Called before a delegation is sent. `step` is 1-based.
    fn on_delegation_start(&self, phase: WorkflowPhase, step: usize, total: usize);

    /// Called once a delegation has returned or failed
    fn on_delegation_complete(&self, phase: WorkflowPhase, success: bool);
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl WorkflowProgressNotifier for NoProgress {
    fn on_delegation_start(&self, _phase: WorkflowPhase, _step: usize, _total: usize) {}
    fn on_delegation_complete(&self, _phase: WorkflowPhase, _success: bool) {}
}
