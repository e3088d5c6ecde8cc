//! API server: serves the launchpad REST API plus operational checks.

use crate::rest::{self, OpsState};
use axum::routing::get;
use axum::Router;
use campaign_core::config::AppConfig;
use campaign_management::{management_router, ManagementState};
use std::net::SocketAddr;
use std::time::Instant;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

pub struct ApiServer {
    config: AppConfig,
    state: ManagementState,
}

impl ApiServer {
    pub fn new(config: AppConfig, state: ManagementState) -> Self {
        Self { config, state }
    }

    /// Full application router with middleware applied.
    pub fn router(&self) -> Router {
        let ops_state = OpsState {
            store: self.state.store.clone(),
            start_time: Instant::now(),
        };

        let ops = Router::new()
            .route("/health", get(rest::health_check))
            .route("/ready", get(rest::readiness))
            .route("/live", get(rest::liveness))
            .with_state(ops_state);

        management_router(self.state.clone())
            .merge(ops)
            .layer(CompressionLayer::new())
            .layer(CorsLayer::permissive())
            .layer(TraceLayer::new_for_http())
    }

    /// Start the HTTP REST server. Runs until the listener fails.
    pub async fn start_http(&self) -> anyhow::Result<()> {
        let app = self.router();
        let addr = SocketAddr::new(self.config.api.host.parse()?, self.config.api.http_port);

        info!(addr = %addr, "Starting HTTP server");

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app).await?;

        Ok(())
    }

    /// Install the Prometheus recorder and its scrape listener when enabled.
    pub fn start_metrics(&self) -> anyhow::Result<()> {
        if !self.config.metrics.enabled {
            return Ok(());
        }

        metrics_exporter_prometheus::PrometheusBuilder::new()
            .with_http_listener(SocketAddr::new(
                self.config.api.host.parse()?,
                self.config.metrics.port,
            ))
            .install()?;

        info!(port = self.config.metrics.port, "Metrics exporter started");
        Ok(())
    }
}
