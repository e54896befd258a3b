//! Run recording.
//!
//! A recording cycle reads the stored total, increments it, prepends an entry
//! for the caller and overwrites the backing store. Callers identify themselves
//! explicitly through [`Caller`]; the [`record_run!`](crate::record_run!) macro
//! fills that in from the call site.

use crate::config::RecorderConfig;
use crate::model::{Caller, LogEntry};
use crate::storage;
use anyhow::{Context, Result};
use std::io::Write;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

/// Printed after the confirmation line.
pub const SEPARATOR: &str = "_______________________________";

pub struct Recorder {
    config: RecorderConfig,
}

impl Recorder {
    pub fn new(config: RecorderConfig) -> Self {
        Self { config }
    }

    /// Stored run total, 0 when the store is missing or unusable.
    pub fn read_total_runs(&self) -> u64 {
        storage::read_total_runs(&self.config.log_path)
    }

    /// Prepend an entry numbered `runs` for `caller` and persist the whole state.
    ///
    /// An unloadable store is replaced by a fresh state holding only this entry.
    pub fn append_entry(&self, runs: u64, caller: &Caller) -> Result<LogEntry> {
        let path = &self.config.log_path;
        let entry = LogEntry {
            timestamp: now_timestamp()?,
            run_number: runs,
            file_name: caller.file_name.clone(),
            file_path: caller.file_path.clone(),
        };

        let mut state = storage::load_state_or(path, runs);
        state.push_front(&entry)?;
        storage::save_state(path, &state)
            .with_context(|| format!("failed to record run {runs}"))?;
        Ok(entry)
    }

    /// Run one recording cycle and return the stored entry.
    pub fn record(&self, caller: &Caller) -> Result<LogEntry> {
        let runs = self.read_total_runs().checked_add(1).with_context(|| {
            format!(
                "run counter in {} cannot be incremented",
                self.config.log_path.display()
            )
        })?;
        tracing::debug!(run = runs, caller = %caller.file_path, "Recording run");
        let entry = self.append_entry(runs, caller)?;

        if self.config.announce {
            let mut out = std::io::stdout().lock();
            for line in confirmation_lines(&entry) {
                let _ = writeln!(out, "{}", line);
            }
        }
        Ok(entry)
    }

    /// Run one recording cycle and return the new run number.
    pub fn record_run(&self, caller: &Caller) -> Result<u64> {
        self.record(caller).map(|e| e.run_number)
    }
}

impl Default for Recorder {
    fn default() -> Self {
        Self::new(RecorderConfig::default())
    }
}

/// Record a run for `caller` against the default backing store.
pub fn record_run(caller: &Caller) -> Result<u64> {
    Recorder::default().record_run(caller)
}

/// Human-readable confirmation for a recorded entry.
pub fn confirmation_lines(entry: &LogEntry) -> Vec<String> {
    vec![
        format!("Log updated: Run {} from {}", entry.run_number, entry.file_name),
        String::new(),
        String::new(),
        String::new(),
        SEPARATOR.to_string(),
    ]
}

/// Local time with offset where available, UTC otherwise.
fn now_timestamp() -> Result<String> {
    let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
    now.format(&Rfc3339).context("format timestamp")
}
