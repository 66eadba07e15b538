//! Score reporting to an external store
//!
//! Fire-and-forget: the session submits a report on terminal outcomes and
//! logs any failure. Nothing here can affect gameplay.

use std::fmt;
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

/// Final result of a run, submitted on game over
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreReport {
    pub final_score: u64,
    /// Unix timestamp in milliseconds
    pub timestamp_ms: f64,
}

impl ScoreReport {
    /// Report stamped with the current wall-clock time
    pub fn now(final_score: u64) -> Self {
        Self {
            final_score,
            timestamp_ms: now_ms(),
        }
    }
}

/// Current Unix time in milliseconds (0.0 if the clock is unavailable)
pub fn now_ms() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as f64)
        .unwrap_or(0.0)
}

/// Why a submission failed
#[derive(Debug)]
pub enum StoreError {
    Io(std::io::Error),
    Encode(serde_json::Error),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Io(e) => write!(f, "score store i/o error: {e}"),
            StoreError::Encode(e) => write!(f, "score report encoding error: {e}"),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        StoreError::Io(e)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Encode(e)
    }
}

/// External score store seam. Implementations may talk to a remote service;
/// the session treats every error as non-fatal.
pub trait ScoreStore {
    fn submit(&self, report: &ScoreReport) -> Result<(), StoreError>;
}

/// Store that drops every report (default for tests and demos)
#[derive(Debug, Default, Clone, Copy)]
pub struct NullStore;

impl ScoreStore for NullStore {
    fn submit(&self, _report: &ScoreReport) -> Result<(), StoreError> {
        Ok(())
    }
}

/// Appends one JSON document per line to a local file
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ScoreStore for JsonFileStore {
    fn submit(&self, report: &ScoreReport) -> Result<(), StoreError> {
        let line = serde_json::to_string(report)?;
        let mut file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{line}")?;
        log::info!(
            "Reported score {} to {}",
            report.final_score,
            self.path.display()
        );
        Ok(())
    }
}
