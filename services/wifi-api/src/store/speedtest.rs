//! Speed-test result history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use wifi_common::WifiResult;

/// Maximum results retained.
const MAX_RESULTS: usize = 100;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeedtestResult {
    pub timestamp: DateTime<Utc>,
    /// Download speed, Mbit/s.
    pub download: f64,
    /// Upload speed, Mbit/s.
    pub upload: f64,
    /// Latency, milliseconds.
    pub ping: f64,
    /// Sponsor name of the test server.
    pub server: String,
}

/// JSON-file-backed speedtest history, chronological order, bounded length.
pub struct SpeedtestStore {
    path: PathBuf,
}

impl SpeedtestStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn load(&self) -> Vec<SpeedtestResult> {
        super::load_or_default(&self.path)
    }

    /// Append a result, keeping only the most recent entries.
    pub fn push(&self, result: SpeedtestResult) -> WifiResult<()> {
        let mut results = self.load();
        results.push(result);
        if results.len() > MAX_RESULTS {
            let excess = results.len() - MAX_RESULTS;
            results.drain(..excess);
        }
        super::save(&self.path, &results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn result(download: f64) -> SpeedtestResult {
        SpeedtestResult {
            timestamp: Utc::now(),
            download,
            upload: 12.5,
            ping: 18.0,
            server: "Example ISP".to_string(),
        }
    }

    #[test]
    fn test_append_preserves_order() {
        let dir = tempdir().unwrap();
        let store = SpeedtestStore::new(dir.path().join("speedtest.json"));

        store.push(result(50.0)).unwrap();
        store.push(result(60.0)).unwrap();

        let loaded = store.load();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].download, 50.0);
        assert_eq!(loaded[1].download, 60.0);
    }

    #[test]
    fn test_drops_oldest_past_cap() {
        let dir = tempdir().unwrap();
        let store = SpeedtestStore::new(dir.path().join("speedtest.json"));

        for i in 0..(MAX_RESULTS + 3) {
            store.push(result(i as f64)).unwrap();
        }

        let loaded = store.load();
        assert_eq!(loaded.len(), MAX_RESULTS);
        // Oldest entries were dropped
        assert_eq!(loaded[0].download, 3.0);
    }
}
