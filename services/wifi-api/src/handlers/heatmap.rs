//! Heatmap rendering endpoint.

use axum::extract::Extension;
use axum::Json;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{instrument, warn};

use heatmap_renderer::RenderError;
use wifi_common::{SamplePoint, WifiError};

use crate::state::AppState;

use super::ApiError;

#[derive(Debug, Deserialize)]
pub struct HeatmapRequest {
    pub points: Vec<SamplePoint>,
    pub width: u32,
    pub height: u32,
    /// Raw JSON of the full accumulated point collection, persisted verbatim
    /// as the latest snapshot. Falls back to serializing `points`.
    #[serde(default)]
    pub raw_points: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct HeatmapResponse {
    /// `data:image/png;base64,<...>` data URL.
    pub image: String,
}

/// POST /api/heatmap - render sample points as a heatmap PNG
///
/// The dense interpolation is CPU-bound, so it runs on the blocking pool
/// rather than a latency-sensitive request thread.
#[instrument(skip(state, request), fields(points = request.points.len(), width = request.width, height = request.height))]
pub async fn heatmap_handler(
    Extension(state): Extension<Arc<AppState>>,
    Json(request): Json<HeatmapRequest>,
) -> Result<Json<HeatmapResponse>, ApiError> {
    // Persist the latest point collection for the assistant and reloads
    let snapshot = match &request.raw_points {
        Some(raw) => raw.clone(),
        None => serde_json::to_string(&request.points).map_err(WifiError::from)?,
    };
    {
        let samples = state.samples.lock().await;
        if let Err(e) = samples.save_raw(&snapshot) {
            warn!(error = %e, "failed to persist heatmap snapshot");
        }
    }

    let HeatmapRequest {
        points,
        width,
        height,
        ..
    } = request;

    let point_count = points.len();
    let png = tokio::task::spawn_blocking(move || heatmap_renderer::render(&points, width, height))
        .await
        .map_err(|e| WifiError::InternalError(format!("render task failed: {}", e)))?
        .map_err(render_error)?;

    let history = state.history.lock().await;
    if let Err(e) = history.add(
        "heatmap",
        format!("Rendered heatmap from {} points", point_count),
        serde_json::json!({ "points": point_count, "width": width, "height": height }),
    ) {
        warn!(error = %e, "failed to record heatmap in history");
    }
    drop(history);

    Ok(Json(HeatmapResponse {
        image: image_data_url(point_count, &png),
    }))
}

/// Build the response data URL.
///
/// An empty sample set is reported as a data URL with an empty payload; the
/// frontend treats that as "nothing measured yet" and skips the overlay
/// entirely instead of compositing a transparent image.
fn image_data_url(point_count: usize, png: &[u8]) -> String {
    if point_count == 0 {
        "data:image/png;base64,".to_string()
    } else {
        format!("data:image/png;base64,{}", BASE64.encode(png))
    }
}

fn render_error(err: RenderError) -> ApiError {
    match err {
        RenderError::InvalidDimensions { width, height } => WifiError::InvalidParameter {
            param: "width/height".to_string(),
            message: format!("{}x{}", width, height),
        }
        .into(),
        other => WifiError::RenderError(other.to_string()).into(),
    }
}
