//! Backing store persistence.
//!
//! The store is a single pretty-printed JSON file. Reads never fail: a missing
//! or unreadable file, or content that is not a JSON object, yields a zero
//! total or an empty state. Any JSON object is loaded leniently so prior
//! entries and unknown keys survive. Writes overwrite the whole file and
//! propagate every error.

use crate::model::LogState;
use anyhow::{Context, Result};
use serde_json::Value;
use std::path::Path;

/// Run total recorded in the store, or 0 if it cannot be determined.
pub fn read_total_runs(path: &Path) -> u64 {
    try_load_state(path).map(|s| s.total_runs).unwrap_or(0)
}

/// Load the full state, or `None` if the file is missing or not a JSON object.
pub fn try_load_state(path: &Path) -> Option<LogState> {
    let raw = std::fs::read_to_string(path).ok()?;
    match serde_json::from_str::<Value>(&raw).ok()? {
        Value::Object(doc) => Some(LogState::from_document(doc)),
        _ => None,
    }
}

/// Load the full state, falling back to an empty one carrying `total_runs`.
pub fn load_state_or(path: &Path, total_runs: u64) -> LogState {
    try_load_state(path).unwrap_or_else(|| LogState::starting_at(total_runs))
}

/// Overwrite the store with `state`.
pub fn save_state(path: &Path, state: &LogState) -> Result<()> {
    let mut json = serde_json::to_string_pretty(state).context("serialize log state")?;
    json.push('\n');
    std::fs::write(path, json).with_context(|| format!("write {}", path.display()))?;
    tracing::debug!(
        path = %path.display(),
        total_runs = state.total_runs,
        entries = state.entries.len(),
        "Saved log state"
    );
    Ok(())
}
