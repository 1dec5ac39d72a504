//! Domain layer for project-workflow
//!
//! This crate contains the workflow records and their rules.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Workflow
//!
//! A project workflow turns a free-text brief into delegated work:
//!
//! - **Planning**: the brief goes to the planning agent, which returns a plan
//! - **Negotiation**: the caller reviews and approves the plan (outside this system)
//! - **Execution**: the plan goes to the environment setup agent, then the coding agent
//!
//! ## Phases and variants
//!
//! Each [`WorkflowPhase`] maps to exactly one agent variant and task type, so
//! a request's routing is decided by the phase that issues it.

pub mod config;
pub mod core;
pub mod prompt;
pub mod workflow;

// Re-export commonly used types
pub use config::OutputFormat;
pub use core::{error::DomainError, user::UserId};
pub use prompt::WorkflowPromptTemplate;
pub use workflow::{
    agent::{AgentVariant, TaskType},
    phase::WorkflowPhase,
    plan::ProjectPlan,
    request::{PLAN_CONTEXT_KEY, WorkflowRequest},
    response::WorkflowResponse,
    result::{WorkflowResult, WorkflowStatus},
};
