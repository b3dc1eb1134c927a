//! LLM-backed assistant endpoint.

use axum::extract::Extension;
use axum::Json;
use serde::Serialize;
use std::sync::Arc;
use tracing::{instrument, warn};

use wifi_common::WifiError;

use crate::assistant::{self, ContextBlocks, PromptRequest};
use crate::scan;
use crate::state::AppState;

use super::ApiError;

#[derive(Debug, Serialize)]
pub struct AssistantResponse {
    pub reply: String,
}

/// POST /api/assistant - forward a question plus network context to the LLM
#[instrument(skip(state, request), fields(action = ?request.action, level = ?request.level))]
pub async fn assistant_handler(
    Extension(state): Extension<Arc<AppState>>,
    Json(request): Json<PromptRequest>,
) -> Result<Json<AssistantResponse>, ApiError> {
    let client = state.assistant.as_ref().ok_or_else(|| {
        WifiError::AssistantUnavailable("GEMINI_API_KEY is not configured".to_string())
    })?;

    let current = match scan::current_connection().await {
        Ok(conn) => conn,
        Err(e) => {
            warn!(error = %e, "current-connection lookup failed");
            None
        }
    };

    let action = request.action.as_deref().unwrap_or("unrestricted");
    let mut context = ContextBlocks::default();

    if assistant::needs(action, "scan") {
        match scan::scan_networks().await {
            Ok(networks) => {
                context.scan = serde_json::to_string(&networks).ok();
            }
            Err(e) => warn!(error = %e, "scan for assistant context failed"),
        }
    }
    if assistant::needs(action, "speedtest") {
        let store = state.speedtests.lock().await;
        let history = store.load();
        if !history.is_empty() {
            context.speedtest = serde_json::to_string(&history).ok();
        }
    }
    if assistant::needs(action, "heatmap") {
        let store = state.samples.lock().await;
        context.heatmap = store.load_raw();
    }

    let parts = assistant::build_prompt(&request, current.as_ref(), &context);

    let reply = client
        .generate(parts)
        .await
        .map_err(|e| WifiError::AssistantUnavailable(e.to_string()))?;

    Ok(Json(AssistantResponse { reply }))
}
