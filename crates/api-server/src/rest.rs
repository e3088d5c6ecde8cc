//! Operational endpoints: health, readiness and liveness checks.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use campaign_management::{run_blocking, CampaignRepository};
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tracing::warn;

/// Shared state for the operational endpoints.
#[derive(Clone)]
pub struct OpsState {
    pub store: Arc<dyn CampaignRepository>,
    pub start_time: Instant,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub version: &'static str,
    pub uptime_secs: u64,
}

/// GET /health: health check endpoint.
pub async fn health_check(State(state): State<OpsState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION"),
        uptime_secs: state.start_time.elapsed().as_secs(),
    })
}

/// GET /ready: 200 only while the campaign history can be read.
pub async fn readiness(State(state): State<OpsState>) -> StatusCode {
    let store = state.store.clone();
    match run_blocking(move || store.list_all()).await {
        Ok(_) => StatusCode::OK,
        Err(e) => {
            warn!(error = %e, "campaign store not readable");
            metrics::counter!("launchpad.api.not_ready").increment(1);
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}

/// GET /live: liveness check.
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}
