//! Workflow phases

use super::agent::{AgentVariant, TaskType};
use serde::{Deserialize, Serialize};

/// Phase of a project workflow that issues a delegated request.
///
/// The phase is the only input that decides which agent variant and task
/// type a request carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowPhase {
    /// Brief → plan, handled by the planning agent
    Planning,
    /// Prepare the environment described by an approved plan
    EnvironmentSetup,
    /// Carry out the coding steps of an approved plan
    Coding,
}

impl WorkflowPhase {
    pub fn variant(&self) -> AgentVariant {
        match self {
            WorkflowPhase::Planning => AgentVariant::ScoutCommander,
            WorkflowPhase::EnvironmentSetup => AgentVariant::EfficiencyBear,
            WorkflowPhase::Coding => AgentVariant::CodeReviewBear,
        }
    }

    pub fn task_type(&self) -> TaskType {
        match self {
            WorkflowPhase::Planning => TaskType::Planning,
            WorkflowPhase::EnvironmentSetup => TaskType::EnvironmentSetup,
            WorkflowPhase::Coding => TaskType::Coding,
        }
    }

    /// Phase that issues requests of the given task type
    pub fn for_task_type(task_type: TaskType) -> WorkflowPhase {
        match task_type {
            TaskType::Planning => WorkflowPhase::Planning,
            TaskType::EnvironmentSetup => WorkflowPhase::EnvironmentSetup,
            TaskType::Coding => WorkflowPhase::Coding,
        }
    }

    /// Phases run by plan execution, in dispatch order.
    pub fn execution_phases() -> [WorkflowPhase; 2] {
        [WorkflowPhase::EnvironmentSetup, WorkflowPhase::Coding]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WorkflowPhase::Planning => "planning",
            WorkflowPhase::EnvironmentSetup => "environment_setup",
            WorkflowPhase::Coding => "coding",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            WorkflowPhase::Planning => "Planning",
            WorkflowPhase::EnvironmentSetup => "Environment Setup",
            WorkflowPhase::Coding => "Coding",
        }
    }
}

impl std::fmt::Display for WorkflowPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_routing() {
        assert_eq!(WorkflowPhase::Planning.variant(), AgentVariant::ScoutCommander);
        assert_eq!(WorkflowPhase::Planning.task_type(), TaskType::Planning);

        assert_eq!(
            WorkflowPhase::EnvironmentSetup.variant(),
            AgentVariant::EfficiencyBear
        );
        assert_eq!(
            WorkflowPhase::EnvironmentSetup.task_type(),
            TaskType::EnvironmentSetup
        );

        assert_eq!(WorkflowPhase::Coding.variant(), AgentVariant::CodeReviewBear);
        assert_eq!(WorkflowPhase::Coding.task_type(), TaskType::Coding);
    }

    #[test]
    fn test_execution_order() {
        assert_eq!(
            WorkflowPhase::execution_phases(),
            [WorkflowPhase::EnvironmentSetup, WorkflowPhase::Coding]
        );
    }

    #[test]
    fn test_as_str_matches_task_type() {
        for phase in [
            WorkflowPhase::Planning,
            WorkflowPhase::EnvironmentSetup,
            WorkflowPhase::Coding,
        ] {
            assert_eq!(phase.as_str(), phase.task_type().as_str());
            assert_eq!(WorkflowPhase::for_task_type(phase.task_type()), phase);
        }
    }
}
