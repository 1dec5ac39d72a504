//! Agent variants and task types (Value Objects)

use serde::{Deserialize, Serialize};

/// Named downstream capability a delegated request is routed to.
///
/// Opaque to the coordinator: the dispatcher decides what each variant does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentVariant {
    /// Planning agent: turns a brief into a project plan
    ScoutCommander,
    /// Environment setup agent
    EfficiencyBear,
    /// Coding agent
    CodeReviewBear,
}

impl AgentVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            AgentVariant::ScoutCommander => "scout_commander",
            AgentVariant::EfficiencyBear => "efficiency_bear",
            AgentVariant::CodeReviewBear => "code_review_bear",
        }
    }
}

impl std::fmt::Display for AgentVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Kind of work a delegated request asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskType {
    Planning,
    EnvironmentSetup,
    Coding,
}

impl TaskType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskType::Planning => "planning",
            TaskType::EnvironmentSetup => "environment_setup",
            TaskType::Coding => "coding",
        }
    }
}

impl std::fmt::Display for TaskType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
