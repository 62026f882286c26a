// src/events.rs
//! Machine-readable event logging for experiment runs.
//!
//! Events are appended to `<output dir>/events.jsonl`.

use crate::graph::GraphFamily;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

pub const LOG_FILE: &str = "events.jsonl";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    RunStarted {
        command: String,
        seed: u64,
    },
    RunFinished {
        command: String,
        elapsed_ms: u64,
    },
    TrialFinished {
        nodes: usize,
        architecture: Vec<usize>,
        eta: f64,
        accuracy: f64,
    },
    BenchCellFinished {
        nodes: usize,
        connections: usize,
        samples: usize,
    },
    GenerationRejected {
        family: GraphFamily,
        nodes: usize,
        connections: usize,
        count: usize,
    },
    PlotWritten {
        path: String,
    },
    RunFailed {
        command: String,
        error: String,
    },
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CoverlabEvent {
    pub timestamp: u64,
    pub kind: EventKind,
}

#[derive(Debug, Clone)]
pub struct EventLogger {
    log_path: Option<PathBuf>,
}

impl EventLogger {
    #[must_use]
    pub fn new(output_dir: &Path) -> Self {
        Self {
            log_path: Some(output_dir.join(LOG_FILE)),
        }
    }

    /// A logger that drops every event.
    #[must_use]
    pub fn disabled() -> Self {
        Self { log_path: None }
    }

    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.log_path.as_deref()
    }

    pub fn log(&self, kind: EventKind) {
        let Some(path) = &self.log_path else {
            return;
        };
        // Best-effort: write failures are dropped.
        if let Ok(json) = Self::serialize_event(kind) {
            let _ = Self::append_to_file(path, &json);
        }
    }

    fn serialize_event(kind: EventKind) -> Result<String> {
        let timestamp = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs();
        let event = CoverlabEvent { timestamp, kind };
        Ok(serde_json::to_string(&event)?)
    }

    fn append_to_file(path: &Path, line: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        writeln!(file, "{line}")?;
        Ok(())
    }
}

/// Reads every event back, skipping lines that do not parse.
///
/// # Errors
/// Returns error if the log cannot be read.
pub fn read_events(path: &Path) -> Result<Vec<CoverlabEvent>> {
    let content = fs::read_to_string(path)?;
    Ok(content
        .lines()
        .filter_map(|line| serde_json::from_str(line).ok())
        .collect())
}
