//! Speed-test handlers.

use axum::extract::Extension;
use axum::Json;
use std::sync::Arc;
use tracing::{instrument, warn};

use crate::state::AppState;
use crate::store::SpeedtestResult;
use crate::{speedtest, triggers};

use super::ApiError;

/// GET /api/speedtest - run a speed test and record the result
#[instrument(skip(state))]
pub async fn speedtest_run_handler(
    Extension(state): Extension<Arc<AppState>>,
) -> Result<Json<SpeedtestResult>, ApiError> {
    let result = speedtest::run_speedtest().await?;

    {
        let store = state.speedtests.lock().await;
        if let Err(e) = store.push(result.clone()) {
            warn!(error = %e, "failed to store speedtest result");
        }
    }

    let alerts = triggers::check_speedtest_result(&result);
    if !alerts.is_empty() {
        let store = state.notifications.lock().await;
        for alert in alerts {
            if let Err(e) = store.add(alert.category, alert.event, alert.description, alert.severity)
            {
                warn!(error = %e, "failed to store speedtest notification");
            }
        }
    }

    Ok(Json(result))
}

/// GET /api/speedtest/history - stored speed-test results
#[instrument(skip(state))]
pub async fn speedtest_history_handler(
    Extension(state): Extension<Arc<AppState>>,
) -> Json<Vec<SpeedtestResult>> {
    let store = state.speedtests.lock().await;
    Json(store.load())
}
