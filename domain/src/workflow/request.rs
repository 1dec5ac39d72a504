//! Delegated request record

use super::agent::{AgentVariant, TaskType};
use super::phase::WorkflowPhase;
use super::plan::ProjectPlan;
use crate::core::user::UserId;
use serde::Serialize;
use serde_json::{Map, Value};

/// Context key under which a plan travels to the execution agents
pub const PLAN_CONTEXT_KEY: &str = "plan";

/// A single request delegated to an agent variant.
///
/// Only constructible from a [`WorkflowPhase`], which fixes `variant` and
/// `task_type`. Immutable after construction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkflowRequest {
    message: String,
    variant: AgentVariant,
    user_id: UserId,
    task_type: TaskType,
    #[serde(skip_serializing_if = "Option::is_none")]
    context: Option<Map<String, Value>>,
}

impl WorkflowRequest {
    pub fn new(phase: WorkflowPhase, message: impl Into<String>, user_id: UserId) -> Self {
        Self {
            message: message.into(),
            variant: phase.variant(),
            user_id,
            task_type: phase.task_type(),
            context: None,
        }
    }

    /// Attach a plan as the request context (`{"plan": <plan>}`)
    pub fn with_plan(mut self, plan: &ProjectPlan) -> Self {
        let mut context = self.context.take().unwrap_or_default();
        context.insert(PLAN_CONTEXT_KEY.to_string(), plan.as_value().clone());
        self.context = Some(context);
        self
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn variant(&self) -> AgentVariant {
        self.variant
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn task_type(&self) -> TaskType {
        self.task_type
    }

    /// Workflow phase this request belongs to
    pub fn phase(&self) -> WorkflowPhase {
        WorkflowPhase::for_task_type(self.task_type)
    }

    pub fn context(&self) -> Option<&Map<String, Value>> {
        self.context.as_ref()
    }

    /// The plan carried in the context, if any
    pub fn plan(&self) -> Option<&Value> {
        self.context.as_ref()?.get(PLAN_CONTEXT_KEY)
    }
}
