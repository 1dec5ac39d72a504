//! JSONL file writer for delegation events.
//!
//! Each [`DelegationEvent`] becomes one JSON line. Lines are appended, so one
//! file holds the transcript of many runs; every line carries the `run` id of
//! the logger that wrote it and a per-run `seq` number.

use chrono::{SecondsFormat, Utc};
use serde_json::{Map, Value};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::warn;
use workflow_application::ports::delegation_logger::{DelegationEvent, DelegationLogger};

/// Loggers opened by this process, for run ids
static LOGGERS_OPENED: AtomicU64 = AtomicU64::new(0);

/// Delegation logger that appends one JSON object per line.
///
/// Thread-safe via `Mutex<BufWriter<File>>`. Flushes after every event.
pub struct JsonlDelegationLogger {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
    run_id: String,
    seq: AtomicU64,
}

impl JsonlDelegationLogger {
    /// Open (or create) the log at `path`, creating parent directories.
    ///
    /// Returns `None` when the file cannot be opened; the workflow then runs
    /// without a transcript.
    pub fn new(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            warn!(
                "Could not create delegation log directory {}: {}",
                parent.display(),
                e
            );
            return None;
        }

        let file = match OpenOptions::new().create(true).append(true).open(path) {
            Ok(f) => f,
            Err(e) => {
                warn!("Could not open delegation log {}: {}", path.display(), e);
                return None;
            }
        };

        Some(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path: path.to_path_buf(),
            run_id: new_run_id(),
            seq: AtomicU64::new(0),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Id stamped on every line this logger writes
    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    fn record(&self, event: DelegationEvent) -> Value {
        let mut record = match event.payload {
            Value::Object(fields) => fields,
            other => {
                let mut fields = Map::new();
                fields.insert("data".to_string(), other);
                fields
            }
        };

        // Envelope fields win over payload keys of the same name
        let seq = self.seq.fetch_add(1, Ordering::Relaxed) + 1;
        record.insert("run".to_string(), Value::from(self.run_id.as_str()));
        record.insert("seq".to_string(), Value::from(seq));
        record.insert("type".to_string(), Value::from(event.event_type));
        record.insert(
            "timestamp".to_string(),
            Value::from(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)),
        );
        Value::Object(record)
    }
}

impl DelegationLogger for JsonlDelegationLogger {
    fn log(&self, event: DelegationEvent) {
        let Ok(line) = serde_json::to_string(&self.record(event)) else {
            return;
        };

        let Ok(mut writer) = self.writer.lock() else {
            return;
        };
        if let Err(e) = writeln!(writer, "{}", line).and_then(|_| writer.flush()) {
            warn!("Could not write delegation log {}: {}", self.path.display(), e);
        }
    }
}

/// `<utc start time>-<pid>-<n>`, unique per logger instance
fn new_run_id() -> String {
    format!(
        "{}-{}-{}",
        Utc::now().format("%Y%m%dT%H%M%S%.3fZ"),
        std::process::id(),
        LOGGERS_OPENED.fetch_add(1, Ordering::Relaxed)
    )
}
