//! Notification store with severity, categories, and read tracking.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use uuid::Uuid;

use wifi_common::WifiResult;

/// Maximum notifications retained.
const MAX_NOTIFICATIONS: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotificationCategory {
    #[serde(rename = "Internet & WAN")]
    Internet,
    #[serde(rename = "Wi-Fi Devices")]
    Wifi,
    #[serde(rename = "Security")]
    Security,
    #[serde(rename = "System")]
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationSeverity {
    Critical,
    Warning,
    Info,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub category: NotificationCategory,
    pub event: String,
    pub description: String,
    pub severity: NotificationSeverity,
    pub read: bool,
}

/// JSON-file-backed notification log, newest first.
pub struct NotificationStore {
    path: PathBuf,
}

impl NotificationStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Load all notifications, newest first.
    pub fn load(&self) -> Vec<Notification> {
        let mut notifications: Vec<Notification> = super::load_or_default(&self.path);
        notifications.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        notifications
    }

    pub fn add(
        &self,
        category: NotificationCategory,
        event: &str,
        description: String,
        severity: NotificationSeverity,
    ) -> WifiResult<Notification> {
        let notification = Notification {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            category,
            event: event.to_string(),
            description,
            severity,
            read: false,
        };

        let mut notifications = self.load();
        notifications.insert(0, notification.clone());
        notifications.truncate(MAX_NOTIFICATIONS);
        super::save(&self.path, &notifications)?;

        Ok(notification)
    }

    pub fn mark_all_read(&self) -> WifiResult<()> {
        let mut notifications = self.load();
        for n in &mut notifications {
            n.read = true;
        }
        super::save(&self.path, &notifications)
    }

    pub fn clear(&self) -> WifiResult<()> {
        super::remove_if_exists(&self.path)
    }
}
