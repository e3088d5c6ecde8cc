//! Paced front end for context generation.
//!
//! The workspace shows four analysis steps ticking over before the context
//! appears. The pacing carries no data; the result is exactly
//! [`generate_context`] of the same URL.

use std::time::{Duration, Instant};

use campaign_core::config::AnalysisConfig;
use campaign_core::types::ContextBundle;
use tracing::{debug, info};

use crate::generator::generate_context;

pub const ANALYSIS_STEPS: [&str; 4] = [
    "Resolving URL Context",
    "Analyzing DOM Structure",
    "Categorizing Content Themes",
    "Generating Ad Creative",
];

#[derive(Debug, Clone)]
pub struct AnalysisPipeline {
    step_delay: Duration,
    default_url: String,
}

impl AnalysisPipeline {
    pub fn new(config: &AnalysisConfig) -> Self {
        Self {
            step_delay: Duration::from_millis(config.step_delay_ms),
            default_url: config.default_url.clone(),
        }
    }

    /// Pipeline without pacing, for tests and one-shot commands.
    pub fn immediate() -> Self {
        Self {
            step_delay: Duration::ZERO,
            default_url: AnalysisConfig::default().default_url,
        }
    }

    /// URL that will actually be analyzed: blank input falls back to the default.
    pub fn resolve_url<'a>(&'a self, url: Option<&'a str>) -> &'a str {
        match url.map(str::trim) {
            Some(u) if !u.is_empty() => u,
            _ => &self.default_url,
        }
    }

    /// Walk the analysis steps, then generate. Dropping the future cancels
    /// the remaining steps.
    pub async fn run(&self, url: Option<&str>) -> ContextBundle {
        let url = self.resolve_url(url);
        let start = Instant::now();

        for (index, step) in ANALYSIS_STEPS.iter().enumerate() {
            debug!(url, step = index, name = step, "analysis step");
            if !self.step_delay.is_zero() {
                tokio::time::sleep(self.step_delay).await;
            }
        }

        let bundle = generate_context(url);
        metrics::counter!("launchpad.context.generated").increment(1);
        info!(
            url,
            topics = bundle.topics.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "context generated"
        );
        bundle
    }
}
