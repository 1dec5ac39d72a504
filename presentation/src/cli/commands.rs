//! CLI command definitions

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use workflow_domain::OutputFormat;

/// Output format for workflow results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormatArg {
    /// Every field of the result
    Full,
    /// Status plus the plan or build status
    Summary,
    /// JSON output
    Json,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Full => OutputFormat::Full,
            OutputFormatArg::Summary => OutputFormat::Summary,
            OutputFormatArg::Json => OutputFormat::Json,
        }
    }
}

/// CLI arguments for project-workflow
#[derive(Parser, Debug)]
#[command(name = "project-workflow")]
#[command(author, version, about = "Turn a project brief into delegated agent work")]
#[command(long_about = r#"
project-workflow turns a free-text project brief into delegated work for
agent variants, in two steps:

1. start:   the brief goes to the planning agent (scout_commander); the plan
            comes back for review and the workflow is "negotiating"
2. execute: the approved plan goes to the environment setup agent
            (efficiency_bear), then to the coding agent (code_review_bear);
            the workflow is "building"

The plan is saved to a file between the two steps so it can be reviewed and
edited before execution.

Configuration files are loaded from (in priority order):
1. PROJECT_WORKFLOW_<SECTION>__<KEY>   Environment overrides
2. --config <path>                     Explicit config file
3. ./workflow.toml                     Project-level config
4. ~/.config/project-workflow/config.toml   Global config

Example:
  project-workflow start "Build a todo app" --user alice
  project-workflow execute --user alice
  project-workflow -o json execute --plan plans/todo.json
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Output format (defaults to the configured format, then "summary")
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormatArg>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files (environment overrides still apply)
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Show configuration sources and exit
    #[arg(long)]
    pub show_config: bool,
}

/// Workflow operations
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Send a project brief to the planning agent
    Start {
        /// The project brief
        brief: String,

        /// User the workflow runs on behalf of
        #[arg(short, long, value_name = "ID")]
        user: Option<String>,

        /// Where to save the returned plan (defaults to workflow.plan_file)
        #[arg(long, value_name = "PATH")]
        save_plan: Option<PathBuf>,
    },

    /// Hand an approved plan to the environment setup and coding agents
    Execute {
        /// Plan file to execute (defaults to workflow.plan_file)
        #[arg(short, long, value_name = "PATH")]
        plan: Option<PathBuf>,

        /// User the workflow runs on behalf of
        #[arg(short, long, value_name = "ID")]
        user: Option<String>,
    },
}

impl Command {
    /// `--user` given on the command line, if any
    pub fn user(&self) -> Option<&str> {
        match self {
            Command::Start { user, .. } | Command::Execute { user, .. } => user.as_deref(),
        }
    }
}
