//! Flat-file JSON stores.
//!
//! Each store is a single JSON file under the data directory. A missing or
//! corrupt file loads as empty; every write replaces the whole file. Caps and
//! ordering follow the app's established log behavior (newest entries first,
//! bounded lengths).

mod history;
mod notifications;
mod samples;
mod speedtest;

pub use history::{HistoryEntry, HistoryStore};
pub use notifications::{Notification, NotificationCategory, NotificationSeverity, NotificationStore};
pub use samples::SampleStore;
pub use speedtest::{SpeedtestResult, SpeedtestStore};

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;

use wifi_common::{WifiError, WifiResult};

/// Load a JSON file, treating a missing or unreadable file as empty.
fn load_or_default<T: DeserializeOwned + Default>(path: &Path) -> T {
    match std::fs::read_to_string(path) {
        Ok(content) => serde_json::from_str(&content).unwrap_or_default(),
        Err(_) => T::default(),
    }
}

/// Overwrite a JSON file with the serialized value.
fn save<T: Serialize>(path: &Path, value: &T) -> WifiResult<()> {
    let json = serde_json::to_string_pretty(value)?;
    std::fs::write(path, json)
        .map_err(|e| WifiError::StorageError(format!("write {}: {}", path.display(), e)))
}

/// Delete a store file if it exists.
fn remove_if_exists(path: &Path) -> WifiResult<()> {
    if path.exists() {
        std::fs::remove_file(path)
            .map_err(|e| WifiError::StorageError(format!("remove {}: {}", path.display(), e)))?;
    }
    Ok(())
}
