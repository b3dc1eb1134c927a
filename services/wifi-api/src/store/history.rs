//! Event history log (scans, heatmap renders).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use wifi_common::WifiResult;

/// Maximum entries retained in the log.
const MAX_ENTRIES: usize = 100;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    /// Entry kind: "scan" or "heatmap".
    #[serde(rename = "type")]
    pub entry_type: String,
    pub summary: String,
    pub details: serde_json::Value,
}

/// JSON-file-backed history log, newest entries first.
pub struct HistoryStore {
    path: PathBuf,
}

impl HistoryStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn load(&self) -> Vec<HistoryEntry> {
        super::load_or_default(&self.path)
    }

    /// Prepend a new entry and truncate to the retention cap.
    pub fn add(
        &self,
        entry_type: &str,
        summary: String,
        details: serde_json::Value,
    ) -> WifiResult<HistoryEntry> {
        let now = Utc::now();
        let entry = HistoryEntry {
            id: now.timestamp_millis().to_string(),
            timestamp: now,
            entry_type: entry_type.to_string(),
            summary,
            details,
        };

        let mut entries = self.load();
        entries.insert(0, entry.clone());
        entries.truncate(MAX_ENTRIES);
        super::save(&self.path, &entries)?;

        Ok(entry)
    }

    pub fn clear(&self) -> WifiResult<()> {
        super::remove_if_exists(&self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_loads_empty() {
        let dir = tempdir().unwrap();
        let store = HistoryStore::new(dir.path().join("history.json"));
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_newest_first() {
        let dir = tempdir().unwrap();
        let store = HistoryStore::new(dir.path().join("history.json"));

        store
            .add("scan", "first".to_string(), serde_json::json!({}))
            .unwrap();
        store
            .add("heatmap", "second".to_string(), serde_json::json!({}))
            .unwrap();

        let entries = store.load();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].summary, "second");
        assert_eq!(entries[1].summary, "first");
    }

    #[test]
    fn test_truncates_at_cap() {
        let dir = tempdir().unwrap();
        let store = HistoryStore::new(dir.path().join("history.json"));

        for i in 0..(MAX_ENTRIES + 10) {
            store
                .add("scan", format!("entry {}", i), serde_json::json!({}))
                .unwrap();
        }
        assert_eq!(store.load().len(), MAX_ENTRIES);
    }

    #[test]
    fn test_corrupt_file_loads_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("history.json");
        std::fs::write(&path, "not json {{{").unwrap();

        let store = HistoryStore::new(path);
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_clear_removes_file() {
        let dir = tempdir().unwrap();
        let store = HistoryStore::new(dir.path().join("history.json"));
        store
            .add("scan", "x".to_string(), serde_json::json!({}))
            .unwrap();
        store.clear().unwrap();
        assert!(store.load().is_empty());
    }
}
