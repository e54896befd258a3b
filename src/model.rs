use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::Path;

/// Persisted contents of the backing store.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LogState {
    pub total_runs: u64,
    /// Newest first, in insertion order. Prior entries are kept exactly as loaded.
    pub entries: Vec<Value>,
    /// Top-level keys the recorder does not manage.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl LogState {
    /// Empty state carrying a run total, used when the store cannot be loaded.
    pub fn starting_at(total_runs: u64) -> Self {
        Self {
            total_runs,
            ..Default::default()
        }
    }

    /// Lenient view of a stored JSON object.
    ///
    /// A `total_runs` that is not a non-negative integer reads as 0, and an
    /// `entries` value that is not an array reads as empty.
    pub fn from_document(mut doc: Map<String, Value>) -> Self {
        let total_runs = doc
            .remove("total_runs")
            .and_then(|v| v.as_u64())
            .unwrap_or(0);
        let entries = match doc.remove("entries") {
            Some(Value::Array(items)) => items,
            _ => Vec::new(),
        };
        Self {
            total_runs,
            entries,
            extra: doc,
        }
    }

    /// Insert `entry` at the front and make its run number the new total.
    pub fn push_front(&mut self, entry: &LogEntry) -> Result<()> {
        let value = serde_json::to_value(entry).context("serialize log entry")?;
        self.total_runs = entry.run_number;
        self.entries.insert(0, value);
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub timestamp: String,
    pub run_number: u64,
    pub file_name: String,
    pub file_path: String,
}

/// Identity of the unit that invoked the recorder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    pub file_name: String,
    pub file_path: String,
}

impl Caller {
    /// Build a caller from its source path; the name is the final path component.
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let file_path = path.display().to_string();
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| file_path.clone());
        Self {
            file_name,
            file_path,
        }
    }

    /// Caller identity for the running executable.
    pub fn current_exe() -> Result<Self> {
        let exe = std::env::current_exe().context("resolve current executable")?;
        Ok(Self::new(exe))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn entry(n: u64) -> LogEntry {
        LogEntry {
            timestamp: "2024-01-01T00:00:00+00:00".into(),
            run_number: n,
            file_name: "main.rs".into(),
            file_path: "src/main.rs".into(),
        }
    }

    fn doc(v: Value) -> Map<String, Value> {
        match v {
            Value::Object(m) => m,
            _ => panic!("not an object"),
        }
    }

    #[test]
    fn caller_name_is_last_component() {
        let c = Caller::new("scripts/nightly/build.sh");
        assert_eq!(c.file_name, "build.sh");
        assert_eq!(c.file_path, "scripts/nightly/build.sh");
    }

    #[test]
    fn caller_without_file_name_uses_path() {
        let c = Caller::new("/");
        assert_eq!(c.file_name, "/");
    }

    #[test]
    fn push_front_keeps_newest_first() {
        let mut state = LogState::default();
        state.push_front(&entry(1)).unwrap();
        state.push_front(&entry(2)).unwrap();
        assert_eq!(state.total_runs, 2);
        assert_eq!(state.entries[0]["run_number"], 2);
        assert_eq!(state.entries[1]["run_number"], 1);
    }

    #[test]
    fn missing_fields_default() {
        assert_eq!(LogState::from_document(Map::new()), LogState::default());

        let state = LogState::from_document(doc(json!({"total_runs": 3})));
        assert_eq!(state.total_runs, 3);
        assert!(state.entries.is_empty());
    }

    #[test]
    fn odd_entries_and_keys_are_kept() {
        let state = LogState::from_document(doc(json!({
            "total_runs": -1,
            "owner": "ci",
            "entries": [{"run_number": 1.5}, "note"]
        })));
        assert_eq!(state.total_runs, 0);
        assert_eq!(state.entries, vec![json!({"run_number": 1.5}), json!("note")]);
        assert_eq!(state.extra.get("owner"), Some(&json!("ci")));

        let out = serde_json::to_value(&state).unwrap();
        assert_eq!(out["owner"], "ci");
        assert_eq!(out["entries"][1], "note");
    }
}
