//! Console output formatter for workflow results

use colored::Colorize;
use serde_json::Value;
use workflow_domain::{OutputFormat, WorkflowResult, WorkflowStatus};

/// Formats workflow results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format a result in the requested output format
    pub fn render(result: &WorkflowResult, format: OutputFormat) -> String {
        match format {
            OutputFormat::Full => Self::format(result),
            OutputFormat::Summary => Self::format_summary(result),
            OutputFormat::Json => Self::format_json(result),
        }
    }

    /// Format every field of the result
    pub fn format(result: &WorkflowResult) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Project Workflow"));
        output.push('\n');

        output.push_str(&format!(
            "{} {}\n",
            "Status:".cyan().bold(),
            Self::status_label(result.status)
        ));

        if let Some(brief) = &result.project_brief {
            output.push_str(&Self::section_header("Project Brief"));
            output.push_str(&format!("{}\n", brief));
        }

        if let Some(plan) = &result.plan {
            output.push_str(&Self::section_header("Plan"));
            output.push_str(&format!("{}\n", Self::render_value(plan.as_value())));
        }

        if let Some(environment) = &result.environment_status {
            output.push_str(&Self::section_header("Environment Setup"));
            output.push_str(&format!("{}\n", Self::render_value(environment)));
        }

        if let Some(coding) = &result.coding_status {
            output.push_str(&Self::section_header("Coding"));
            output.push_str(&format!("{}\n", Self::render_value(coding)));
        }

        if let Some(hint) = Self::next_step(result.status) {
            output.push_str(&format!("\n{} {}\n", "Next:".dimmed(), hint));
        }

        output.push_str(&Self::footer());
        output
    }

    /// Status line plus the field that matters for that status
    pub fn format_summary(result: &WorkflowResult) -> String {
        let mut output = format!(
            "{} {}\n\n",
            "=== Workflow".cyan().bold(),
            Self::status_label(result.status)
        );

        match result.status {
            WorkflowStatus::Negotiating => {
                if let Some(plan) = &result.plan {
                    output.push_str(&Self::render_value(plan.as_value()));
                    output.push('\n');
                }
            }
            _ => {
                if let Some(environment) = &result.environment_status {
                    output.push_str(&format!(
                        "{} {}\n",
                        "environment:".bold(),
                        Self::render_value(environment)
                    ));
                }
                if let Some(coding) = &result.coding_status {
                    output.push_str(&format!(
                        "{} {}\n",
                        "coding:".bold(),
                        Self::render_value(coding)
                    ));
                }
            }
        }

        output
    }

    /// Format as JSON
    pub fn format_json(result: &WorkflowResult) -> String {
        serde_json::to_string_pretty(result).unwrap_or_else(|_| "{}".to_string())
    }

    /// Strings print as-is; structured values as pretty JSON
    pub fn render_value(value: &Value) -> String {
        match value {
            Value::String(s) => s.clone(),
            other => serde_json::to_string_pretty(other).unwrap_or_else(|_| other.to_string()),
        }
    }

    fn status_label(status: WorkflowStatus) -> String {
        match status {
            WorkflowStatus::Negotiating => status.as_str().yellow().bold().to_string(),
            WorkflowStatus::Building => status.as_str().green().bold().to_string(),
            WorkflowStatus::Deployed => status.as_str().blue().bold().to_string(),
        }
    }

    fn next_step(status: WorkflowStatus) -> Option<&'static str> {
        match status {
            WorkflowStatus::Negotiating => {
                Some("review the plan, then run `project-workflow execute` to build it")
            }
            WorkflowStatus::Building | WorkflowStatus::Deployed => None,
        }
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }
}
