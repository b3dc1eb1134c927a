//! Event-history endpoints.

use axum::extract::Extension;
use axum::Json;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::instrument;

use crate::state::AppState;
use crate::store::HistoryEntry;

use super::ApiError;

/// GET /api/history - event log, newest first
#[instrument(skip(state))]
pub async fn history_handler(
    Extension(state): Extension<Arc<AppState>>,
) -> Json<Vec<HistoryEntry>> {
    let store = state.history.lock().await;
    Json(store.load())
}

/// DELETE /api/history - clear the event log
#[instrument(skip(state))]
pub async fn history_clear_handler(
    Extension(state): Extension<Arc<AppState>>,
) -> Result<Json<Value>, ApiError> {
    let store = state.history.lock().await;
    store.clear()?;
    Ok(Json(json!({ "success": true })))
}
