//! Liveness endpoints.

use axum::Json;
use serde_json::{json, Value};

/// GET / - root liveness message
pub async fn root_handler() -> Json<Value> {
    Json(json!({ "message": "Backend is running!" }))
}

/// GET /health - health check
pub async fn health_handler() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
