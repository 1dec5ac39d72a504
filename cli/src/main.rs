//! CLI entrypoint for project-workflow
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::{CommandFactory, Parser};
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};
use workflow_application::{
    DelegationLogger, Dispatcher, NoProgress, WorkflowCoordinator, WorkflowProgressNotifier,
};
use workflow_domain::{OutputFormat, ProjectPlan, UserId};
use workflow_infrastructure::{
    ConfigLoader, FileConfig, HttpDispatcher, JsonlDelegationLogger, PlanFileStore,
};
use workflow_presentation::{Cli, Command, ConsoleFormatter, ProgressReporter, SimpleProgress};

/// Name of the diagnostic log file written under `logging.log_dir`
const LOG_FILE_NAME: &str = "project-workflow.log";

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_deref());
        return Ok(());
    }

    let config = if cli.no_config {
        ConfigLoader::load_without_files()
    } else {
        ConfigLoader::load(cli.config.as_deref())
    }
    .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?;

    // Kept alive until exit so buffered log lines are flushed
    let _log_guard = init_logging(cli.verbose, &config);

    for issue in config.validate() {
        warn!("Config: {}", issue);
    }

    if !config.output.color {
        colored::control::set_override(false);
    }

    let Some(command) = cli.command.as_ref() else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let user_id = resolve_user(command.user(), &config)?;
    let format = cli
        .output
        .map(OutputFormat::from)
        .or(config.output.format)
        .unwrap_or_default();

    // === Dependency Injection ===
    let dispatcher = Arc::new(HttpDispatcher::new(&config.dispatcher)?);
    let mut coordinator = WorkflowCoordinator::new(dispatcher);
    if let Some(path) = &config.logging.delegation_log
        && let Some(logger) = JsonlDelegationLogger::new(path)
    {
        info!("Recording delegations to {}", logger.path().display());
        coordinator = coordinator.with_logger(Arc::new(logger) as Arc<dyn DelegationLogger>);
    }

    // Spinners and log lines share stderr, so verbose runs get plain text
    let progress: Box<dyn WorkflowProgressNotifier> = if cli.quiet {
        Box::new(NoProgress)
    } else if cli.verbose > 0 {
        Box::new(SimpleProgress)
    } else {
        Box::new(ProgressReporter::new())
    };

    let mut stdout = std::io::stdout();
    match command {
        Command::Start {
            brief, save_plan, ..
        } => {
            let plan_path = save_plan
                .clone()
                .unwrap_or_else(|| config.workflow.plan_file.clone());
            start_workflow(
                &coordinator,
                brief,
                &user_id,
                &plan_path,
                progress.as_ref(),
                format,
                &mut stdout,
            )
            .await?;
        }
        Command::Execute { plan, .. } => {
            let plan_path = plan
                .clone()
                .unwrap_or_else(|| config.workflow.plan_file.clone());
            execute_workflow(
                &coordinator,
                &plan_path,
                &user_id,
                progress.as_ref(),
                format,
                &mut stdout,
            )
            .await?;
        }
    }

    Ok(())
}

/// Ask for a plan, show it, then save it for `execute`.
///
/// The result is written before the plan file so a failed save still leaves
/// the plan on screen.
async fn start_workflow<D: Dispatcher + 'static>(
    coordinator: &WorkflowCoordinator<D>,
    brief: &str,
    user_id: &UserId,
    plan_path: &Path,
    progress: &dyn WorkflowProgressNotifier,
    format: OutputFormat,
    out: &mut impl Write,
) -> Result<()> {
    let result = coordinator
        .start_project_workflow_with_progress(brief, user_id, progress)
        .await?;

    writeln!(out, "{}", ConsoleFormatter::render(&result, format))?;
    out.flush()?;

    if let Some(plan) = &result.plan {
        PlanFileStore::save(plan_path, plan).with_context(|| {
            format!(
                "Plan shown above was not saved to {}",
                plan_path.display()
            )
        })?;
        info!("Plan saved to {}", plan_path.display());
    }
    Ok(())
}

/// Load an approved plan and hand it to the execution agents
async fn execute_workflow<D: Dispatcher + 'static>(
    coordinator: &WorkflowCoordinator<D>,
    plan_path: &Path,
    user_id: &UserId,
    progress: &dyn WorkflowProgressNotifier,
    format: OutputFormat,
    out: &mut impl Write,
) -> Result<()> {
    let plan: ProjectPlan = PlanFileStore::load(plan_path)
        .with_context(|| format!("No approved plan at {}", plan_path.display()))?;

    let result = coordinator
        .execute_project_plan_with_progress(&plan, user_id, progress)
        .await?;

    writeln!(out, "{}", ConsoleFormatter::render(&result, format))?;
    Ok(())
}

/// Install the stderr subscriber, plus a file layer when `logging.log_dir` is set
fn init_logging(verbose: u8, config: &FileConfig) -> Option<WorkerGuard> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    };

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(EnvFilter::new(level));

    let (file_layer, guard) = match &config.logging.log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::never(dir, LOG_FILE_NAME);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_filter(EnvFilter::new("debug"));
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(file_layer)
        .init();

    guard
}

/// `--user` wins over `workflow.default_user_id`
fn resolve_user(cli_user: Option<&str>, config: &FileConfig) -> Result<UserId> {
    let Some(raw) = cli_user.or(config.workflow.default_user_id.as_deref()) else {
        bail!("No user given. Pass --user or set workflow.default_user_id");
    };
    Ok(raw.parse::<UserId>()?)
}
