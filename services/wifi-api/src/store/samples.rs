//! Latest-snapshot store for the accumulated heatmap point collection.
//!
//! The renderer itself never touches disk; the caller persists the raw point
//! JSON it received so the assistant (and a restarted frontend) can reload
//! the latest collection. Single file, overwritten on every render request.

use std::path::PathBuf;

use wifi_common::{WifiError, WifiResult};

pub struct SampleStore {
    path: PathBuf,
}

impl SampleStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Persist the raw point-collection JSON verbatim.
    pub fn save_raw(&self, raw: &str) -> WifiResult<()> {
        std::fs::write(&self.path, raw)
            .map_err(|e| WifiError::StorageError(format!("write {}: {}", self.path.display(), e)))
    }

    /// Load the latest snapshot, if one has been saved.
    pub fn load_raw(&self) -> Option<String> {
        std::fs::read_to_string(&self.path).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_overwrites_previous_snapshot() {
        let dir = tempdir().unwrap();
        let store = SampleStore::new(dir.path().join("heatmap_points.json"));

        assert!(store.load_raw().is_none());

        store.save_raw(r#"[{"x":1,"y":2,"rssi":-50}]"#).unwrap();
        store.save_raw(r#"[{"x":3,"y":4,"rssi":-70}]"#).unwrap();

        let raw = store.load_raw().unwrap();
        assert!(raw.contains("-70"));
        assert!(!raw.contains("-50"));
    }
}
