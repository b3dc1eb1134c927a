//! Application state and shared resources.

use anyhow::Result;
use std::env;
use std::path::Path;
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::assistant::GeminiClient;
use crate::store::{HistoryStore, NotificationStore, SampleStore, SpeedtestStore};

/// Shared application state.
///
/// Each flat-file store is guarded by its own mutex; writes are whole-file
/// overwrites, so serializing access per store is all the coordination the
/// backend needs.
pub struct AppState {
    pub history: Mutex<HistoryStore>,
    pub notifications: Mutex<NotificationStore>,
    pub speedtests: Mutex<SpeedtestStore>,
    pub samples: Mutex<SampleStore>,
    pub assistant: Option<GeminiClient>,
}

impl AppState {
    pub fn new(data_dir: &str) -> Result<Self> {
        let dir = Path::new(data_dir);
        std::fs::create_dir_all(dir)?;

        let history = HistoryStore::new(dir.join("history_data.json"));
        let notifications = NotificationStore::new(dir.join("notifications.json"));
        let speedtests = SpeedtestStore::new(dir.join("speedtest_history.json"));
        let samples = SampleStore::new(dir.join("heatmap_points.json"));

        let assistant = match env::var("GEMINI_API_KEY") {
            Ok(key) if !key.is_empty() => {
                let model = env::var("GEMINI_MODEL").ok();
                info!("Assistant client configured");
                Some(GeminiClient::new(key, model)?)
            }
            _ => {
                warn!("GEMINI_API_KEY not set; assistant endpoint disabled");
                None
            }
        };

        Ok(Self {
            history: Mutex::new(history),
            notifications: Mutex::new(notifications),
            speedtests: Mutex::new(speedtests),
            samples: Mutex::new(samples),
            assistant,
        })
    }
}
