//! Progress reporting for workflow delegations

use colored::Colorize;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::Mutex;
use std::time::Duration;
use workflow_application::ports::progress::WorkflowProgressNotifier;
use workflow_domain::WorkflowPhase;

/// Reports progress with one spinner per delegation
pub struct ProgressReporter {
    multi: MultiProgress,
    current: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::new(),
            current: Mutex::new(None),
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold.cyan} {msg} {elapsed:.dim}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn step_label(phase: WorkflowPhase, step: usize, total: usize) -> String {
        format!("[{}/{}] {}", step, total, phase.display_name())
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl WorkflowProgressNotifier for ProgressReporter {
    fn on_delegation_start(&self, phase: WorkflowPhase, step: usize, total: usize) {
        let pb = self.multi.add(ProgressBar::new_spinner());
        pb.set_style(Self::spinner_style());
        pb.set_prefix(Self::step_label(phase, step, total));
        pb.set_message(format!("-> {}", phase.variant()));
        pb.enable_steady_tick(Duration::from_millis(120));

        if let Ok(mut current) = self.current.lock() {
            *current = Some(pb);
        }
    }

    fn on_delegation_complete(&self, phase: WorkflowPhase, success: bool) {
        let Ok(mut current) = self.current.lock() else {
            return;
        };
        if let Some(pb) = current.take() {
            let status = if success {
                format!("{} {}", "v".green(), phase.variant())
            } else {
                format!("{} {} failed", "x".red(), phase.variant())
            };
            pb.finish_with_message(status);
        }
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl WorkflowProgressNotifier for SimpleProgress {
    fn on_delegation_start(&self, phase: WorkflowPhase, step: usize, total: usize) {
        println!(
            "{} {} ({})",
            "->".cyan(),
            ProgressReporter::step_label(phase, step, total).bold(),
            phase.variant()
        );
    }

    fn on_delegation_complete(&self, phase: WorkflowPhase, success: bool) {
        if success {
            println!("  {} {}", "v".green(), phase.display_name());
        } else {
            println!("  {} {} (failed)", "x".red(), phase.display_name());
        }
    }
}
