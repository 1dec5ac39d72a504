//! Plan file store
//!
//! Keeps a [`ProjectPlan`] on disk between starting a workflow and executing
//! the approved plan. The file is plain pretty-printed JSON so it can be
//! reviewed and edited during negotiation.

use std::path::Path;
use thiserror::Error;
use tracing::debug;
use workflow_domain::ProjectPlan;

/// Errors from reading or writing a plan file
#[derive(Error, Debug)]
pub enum PlanStoreError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("Plan file {path} is not valid JSON: {source}")]
    InvalidJson {
        path: String,
        source: serde_json::Error,
    },
}

/// Reads and writes plans as JSON files
pub struct PlanFileStore;

impl PlanFileStore {
    /// Write the plan, creating parent directories as needed
    pub fn save(path: &Path, plan: &ProjectPlan) -> Result<(), PlanStoreError> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|source| io_error(path, source))?;
        }

        let json = serde_json::to_string_pretty(plan).map_err(|source| {
            PlanStoreError::InvalidJson {
                path: path.display().to_string(),
                source,
            }
        })?;
        std::fs::write(path, json + "\n").map_err(|source| io_error(path, source))?;

        debug!("Saved plan to {}", path.display());
        Ok(())
    }

    /// Read a plan saved by [`PlanFileStore::save`] (or written by hand)
    pub fn load(path: &Path) -> Result<ProjectPlan, PlanStoreError> {
        let content = std::fs::read_to_string(path).map_err(|source| io_error(path, source))?;
        serde_json::from_str(&content).map_err(|source| PlanStoreError::InvalidJson {
            path: path.display().to_string(),
            source,
        })
    }
}

fn io_error(path: &Path, source: std::io::Error) -> PlanStoreError {
    PlanStoreError::Io {
        path: path.display().to_string(),
        source,
    }
}
