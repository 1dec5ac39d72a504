//! Workflow status and result types

use super::plan::ProjectPlan;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Status of a workflow instance, tracked by the caller.
///
/// ```text
/// negotiating --(plan approved, execute)--> building --(external)--> deployed
/// ```
///
/// The coordinator only ever reports `Negotiating` or `Building`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowStatus {
    /// A plan exists and waits for approval
    Negotiating,
    /// The approved plan has been handed to the execution agents
    Building,
    /// Deployed outside this system
    Deployed,
}

impl WorkflowStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkflowStatus::Negotiating => "negotiating",
            WorkflowStatus::Building => "building",
            WorkflowStatus::Deployed => "deployed",
        }
    }
}

impl std::fmt::Display for WorkflowStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Status report returned by a workflow operation.
///
/// Which optional fields are present depends on the operation:
/// starting a workflow fills `plan` and `project_brief`, executing a plan
/// fills `environment_status` and `coding_status`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowResult {
    pub success: bool,
    pub status: WorkflowStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan: Option<ProjectPlan>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_brief: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment_status: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coding_status: Option<Value>,
}

impl WorkflowResult {
    /// Result of starting a workflow: a plan awaiting approval
    pub fn negotiating(plan: ProjectPlan, project_brief: impl Into<String>) -> Self {
        Self {
            success: true,
            status: WorkflowStatus::Negotiating,
            plan: Some(plan),
            project_brief: Some(project_brief.into()),
            environment_status: None,
            coding_status: None,
        }
    }

    /// Result of executing a plan
    pub fn building(environment_status: Value, coding_status: Value) -> Self {
        Self {
            success: true,
            status: WorkflowStatus::Building,
            plan: None,
            project_brief: None,
            environment_status: Some(environment_status),
            coding_status: Some(coding_status),
        }
    }
}
