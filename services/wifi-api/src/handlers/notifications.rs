//! Notification endpoints.

use axum::extract::Extension;
use axum::Json;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::instrument;

use crate::state::AppState;
use crate::store::Notification;

use super::ApiError;

/// GET /api/notifications - all notifications, newest first
#[instrument(skip(state))]
pub async fn notifications_handler(
    Extension(state): Extension<Arc<AppState>>,
) -> Json<Vec<Notification>> {
    let store = state.notifications.lock().await;
    Json(store.load())
}

/// POST /api/notifications/read - mark every notification as read
#[instrument(skip(state))]
pub async fn notifications_read_handler(
    Extension(state): Extension<Arc<AppState>>,
) -> Result<Json<Value>, ApiError> {
    let store = state.notifications.lock().await;
    store.mark_all_read()?;
    Ok(Json(json!({ "success": true })))
}

/// DELETE /api/notifications - clear all notifications
#[instrument(skip(state))]
pub async fn notifications_clear_handler(
    Extension(state): Extension<Arc<AppState>>,
) -> Result<Json<Value>, ApiError> {
    let store = state.notifications.lock().await;
    store.clear()?;
    Ok(Json(json!({ "success": true })))
}
