//! Prompt domain
//!
//! Fixed messages sent to each agent variant during a project workflow.

mod template;

pub use template::WorkflowPromptTemplate;
