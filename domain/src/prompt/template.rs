//! Message templates for the project workflow

use crate::workflow::phase::WorkflowPhase;

/// Templates for the message of each delegated request
pub struct WorkflowPromptTemplate;

impl WorkflowPromptTemplate {
    /// Planning request message; embeds the brief verbatim
    pub fn planning(project_brief: &str) -> String {
        format!(
            r#"Create a detailed project plan for the following brief:

{}

Break the work into environment setup steps and coding steps, and list any
open decisions that need the requester's approval before building starts."#,
            project_brief
        )
    }

    /// Environment setup request message
    pub fn environment_setup() -> &'static str {
        r#"Set up the development environment according to the approved project plan
provided in the context. Report what was installed or configured."#
    }

    /// Coding request message
    pub fn coding() -> &'static str {
        r#"Execute the coding steps of the approved project plan provided in the context.
Report the changes made and anything left unfinished."#
    }

    /// Fixed message for an execution phase.
    ///
    /// Planning is excluded: its message depends on the brief.
    pub fn execution_message(phase: WorkflowPhase) -> Option<&'static str> {
        match phase {
            WorkflowPhase::Planning => None,
            WorkflowPhase::EnvironmentSetup => Some(Self::environment_setup()),
            WorkflowPhase::Coding => Some(Self::coding()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_planning_embeds_brief_verbatim() {
        let brief = "Build a todo app\nwith  two   spaces and {braces}";
        let message = WorkflowPromptTemplate::planning(brief);
        assert!(message.contains(brief));
    }

    #[test]
    fn test_execution_messages() {
        assert!(WorkflowPromptTemplate::execution_message(WorkflowPhase::Planning).is_none());
        assert_eq!(
            WorkflowPromptTemplate::execution_message(WorkflowPhase::EnvironmentSetup),
            Some(WorkflowPromptTemplate::environment_setup())
        );
        assert_eq!(
            WorkflowPromptTemplate::execution_message(WorkflowPhase::Coding),
            Some(WorkflowPromptTemplate::coding())
        );
    }

    #[test]
    fn test_every_execution_phase_has_a_message() {
        for phase in WorkflowPhase::execution_phases() {
            assert!(WorkflowPromptTemplate::execution_message(phase).is_some());
        }
    }
}
