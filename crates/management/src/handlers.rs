//! Axum REST handlers for the launchpad API.

use crate::clock::Clock;
use crate::launch::{LaunchOutcome, LaunchRequest, LaunchWorkflow};
use crate::models::*;
use crate::store::CampaignRepository;
use crate::workspace::WorkspaceDraft;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use campaign_context::AnalysisPipeline;
use campaign_core::error::{CampaignError, CampaignResult};
use campaign_core::types::{Campaign, MetricsResult, PolicyWarning, RoasResult};
use campaign_policy::check_policy;
use campaign_reporting::metrics::{calculate_metrics, calculate_roas, DEFAULT_CTR};
use campaign_reporting::inputs::{CtrOption, CtrPreset};
use campaign_reporting::DashboardView;
use std::sync::Arc;
use tracing::{error, info};

/// Shared handler state.
#[derive(Clone)]
pub struct ManagementState {
    pub store: Arc<dyn CampaignRepository>,
    pub launcher: LaunchWorkflow,
    pub pipeline: Arc<AnalysisPipeline>,
}

impl ManagementState {
    pub fn new(
        store: Arc<dyn CampaignRepository>,
        clock: Arc<dyn Clock>,
        pipeline: AnalysisPipeline,
    ) -> Self {
        Self {
            launcher: LaunchWorkflow::new(store.clone(), clock),
            store,
            pipeline: Arc::new(pipeline),
        }
    }
}

pub type ApiError = (StatusCode, Json<ErrorResponse>);

/// Run store work on the blocking pool; the file backend does synchronous I/O.
pub async fn run_blocking<T, F>(work: F) -> CampaignResult<T>
where
    F: FnOnce() -> CampaignResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| CampaignError::Internal(anyhow::Error::new(e)))?
}

fn reject(err: CampaignError) -> ApiError {
    let status = match &err {
        CampaignError::Validation(_) => StatusCode::BAD_REQUEST,
        CampaignError::NotFound(_) => StatusCode::NOT_FOUND,
        CampaignError::PolicyConfirmationRequired { .. } => StatusCode::CONFLICT,
        _ => {
            error!(error = %err, "request failed");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    (status, Json(ErrorResponse::from(err)))
}

// ─── Context & estimates ───────────────────────────────────────────────────

pub async fn generate_context(
    State(state): State<ManagementState>,
    Json(req): Json<ContextRequest>,
) -> Json<ContextResponse> {
    let url = state.pipeline.resolve_url(req.url.as_deref()).to_string();
    let context = state.pipeline.run(Some(&url)).await;
    let draft = WorkspaceDraft::from_context(url, context);
    let metrics = draft.metrics();
    Json(ContextResponse { draft, metrics })
}

pub async fn estimate_metrics(
    Json(req): Json<MetricsRequest>,
) -> Result<Json<MetricsResult>, ApiError> {
    let ctr = req.ctr.unwrap_or(DEFAULT_CTR);
    if !(0.0..=1.0).contains(&ctr) {
        return Err(reject(CampaignError::Validation(format!(
            "ctr must be between 0 and 1, got {ctr}"
        ))));
    }
    Ok(Json(calculate_metrics(req.budget.as_f64(), req.publisher_mix, ctr)))
}

pub async fn ctr_presets() -> Json<Vec<CtrOption>> {
    Json(CtrPreset::options())
}

pub async fn estimate_roas(Json(req): Json<RoasRequest>) -> Json<RoasResult> {
    Json(calculate_roas(req.est_clicks, req.budget))
}

pub async fn check_copy(Json(req): Json<PolicyRequest>) -> Json<Vec<PolicyWarning>> {
    Json(check_policy(&req.text))
}

// ─── Campaigns ─────────────────────────────────────────────────────────────

pub async fn launch_campaign(
    State(state): State<ManagementState>,
    Json(req): Json<LaunchRequest>,
) -> Result<(StatusCode, Json<LaunchOutcome>), ApiError> {
    let launcher = state.launcher.clone();
    run_blocking(move || launcher.launch(req))
        .await
        .map(|outcome| (StatusCode::CREATED, Json(outcome)))
        .map_err(reject)
}

pub async fn list_campaigns(
    State(state): State<ManagementState>,
) -> Result<Json<Vec<Campaign>>, ApiError> {
    let store = state.store.clone();
    run_blocking(move || store.list_all())
        .await
        .map(Json)
        .map_err(reject)
}

pub async fn get_campaign(
    State(state): State<ManagementState>,
    Path(id): Path<String>,
) -> Result<Json<Campaign>, ApiError> {
    let store = state.store.clone();
    let lookup = id.clone();
    match run_blocking(move || store.get_by_id(&lookup)).await.map_err(reject)? {
        Some(campaign) => Ok(Json(campaign)),
        None => Err(reject(CampaignError::NotFound(format!("campaign {id}")))),
    }
}

pub async fn clear_campaigns(State(state): State<ManagementState>) -> Result<StatusCode, ApiError> {
    let store = state.store.clone();
    run_blocking(move || store.clear_all()).await.map_err(reject)?;
    metrics::counter!("launchpad.campaigns.cleared").increment(1);
    info!("campaign history cleared");
    Ok(StatusCode::NO_CONTENT)
}

pub async fn dashboard(
    State(state): State<ManagementState>,
) -> Result<Json<DashboardView>, ApiError> {
    let store = state.store.clone();
    let campaigns = run_blocking(move || store.list_all()).await.map_err(reject)?;
    Ok(Json(DashboardView::build(&campaigns)))
}
