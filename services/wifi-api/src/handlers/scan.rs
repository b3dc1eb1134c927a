//! Network scanning handlers.

use axum::extract::Extension;
use axum::Json;
use serde::Serialize;
use std::sync::Arc;
use tracing::{instrument, warn};

use wifi_common::{CurrentConnection, NetworkInfo};

use crate::state::AppState;
use crate::{scan, triggers};

use super::ApiError;

#[derive(Debug, Serialize)]
pub struct ScanResponse {
    pub success: bool,
    pub data: Vec<NetworkInfo>,
}

/// GET /api/scan - scan nearby networks
///
/// Scan results also feed the notification triggers and the history log;
/// failures there are logged but never fail the scan itself.
#[instrument(skip(state))]
pub async fn scan_handler(
    Extension(state): Extension<Arc<AppState>>,
) -> Result<Json<ScanResponse>, ApiError> {
    let networks = scan::scan_networks().await?;

    let alerts = triggers::check_scan_results(&networks);
    if !alerts.is_empty() {
        let store = state.notifications.lock().await;
        for alert in alerts {
            if let Err(e) = store.add(alert.category, alert.event, alert.description, alert.severity)
            {
                warn!(error = %e, "failed to store scan notification");
            }
        }
    }

    let history = state.history.lock().await;
    if let Err(e) = history.add(
        "scan",
        format!("Found {} networks", networks.len()),
        serde_json::json!({ "networks": &networks }),
    ) {
        warn!(error = %e, "failed to record scan in history");
    }
    drop(history);

    Ok(Json(ScanResponse {
        success: true,
        data: networks,
    }))
}

/// GET /api/network/current - the currently associated connection
#[instrument]
pub async fn current_network_handler() -> Result<Json<Option<CurrentConnection>>, ApiError> {
    Ok(Json(scan::current_connection().await?))
}
