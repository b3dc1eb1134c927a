//! HTTP request handlers.
//!
//! This module is organized into submodules:
//! - `scan`: network scanning and current-connection lookup
//! - `heatmap`: heatmap rendering endpoint
//! - `speedtest`: speed-test invocation and history
//! - `history`: event log endpoints
//! - `notifications`: notification endpoints
//! - `assistant`: LLM-backed assistant endpoint
//! - `health`: liveness endpoints

pub mod assistant;
pub mod health;
pub mod heatmap;
pub mod history;
pub mod notifications;
pub mod scan;
pub mod speedtest;

pub use assistant::assistant_handler;
pub use health::{health_handler, root_handler};
pub use heatmap::heatmap_handler;
pub use history::{history_clear_handler, history_handler};
pub use notifications::{
    notifications_clear_handler, notifications_handler, notifications_read_handler,
};
pub use scan::{current_network_handler, scan_handler};
pub use speedtest::{speedtest_history_handler, speedtest_run_handler};

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use wifi_common::WifiError;

/// Wrapper translating [`WifiError`] into an HTTP error response.
pub struct ApiError(pub WifiError);

impl From<WifiError> for ApiError {
    fn from(err: WifiError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        tracing::error!(status = %status, error = %self.0, "request failed");
        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}
