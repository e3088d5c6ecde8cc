//! Launchpad API router mounting all endpoints under /api/v1.

use crate::handlers::{self, ManagementState};
use axum::routing::{get, post};
use axum::Router;

/// Build the launchpad router. Returns a Router that should be merged into
/// the main app.
pub fn management_router(state: ManagementState) -> Router {
    Router::new()
        // Context & estimates
        .route("/api/v1/context", post(handlers::generate_context))
        .route("/api/v1/metrics", post(handlers::estimate_metrics))
        .route("/api/v1/roas", post(handlers::estimate_roas))
        .route("/api/v1/ctr-presets", get(handlers::ctr_presets))
        .route("/api/v1/policy", post(handlers::check_copy))
        // Campaigns
        .route("/api/v1/campaigns", get(handlers::list_campaigns).delete(handlers::clear_campaigns))
        .route("/api/v1/campaigns/launch", post(handlers::launch_campaign))
        .route("/api/v1/campaigns/:id", get(handlers::get_campaign))
        // Dashboard
        .route("/api/v1/dashboard", get(handlers::dashboard))
        .with_state(state)
}
