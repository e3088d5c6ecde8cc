//! Launch workflow: policy gate, campaign record, persistence, ROAS projection.

use std::sync::Arc;

use campaign_core::error::{CampaignError, CampaignResult};
use campaign_core::types::{Campaign, PolicyWarning, PublisherMix, RoasResult};
use campaign_policy::PolicyReview;
use campaign_reporting::inputs::Budget;
use campaign_reporting::metrics::{calculate_metrics, calculate_roas, DEFAULT_CTR};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::clock::Clock;
use crate::store::CampaignRepository;

/// Final selections submitted from the workspace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LaunchRequest {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub selected_topics: Vec<String>,
    #[serde(default)]
    pub publisher_mix: PublisherMix,
    #[serde(default = "default_budget")]
    pub budget: f64,
    #[serde(default)]
    pub ctr: Option<f64>,
    #[serde(default)]
    pub headline: String,
    #[serde(default)]
    pub description: String,
    /// Warnings carried over from context generation.
    #[serde(default)]
    pub warnings: Vec<PolicyWarning>,
    /// Advertiser certifies any flagged claims are substantiated.
    #[serde(default)]
    pub confirmed: bool,
}

fn default_budget() -> f64 {
    f64::from(Budget::DEFAULT)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LaunchOutcome {
    pub campaign: Campaign,
    pub projection: RoasResult,
    pub acknowledged_warnings: Vec<PolicyWarning>,
}

#[derive(Clone)]
pub struct LaunchWorkflow {
    repository: Arc<dyn CampaignRepository>,
    clock: Arc<dyn Clock>,
}

impl LaunchWorkflow {
    pub fn new(repository: Arc<dyn CampaignRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    /// Screen, record and persist a campaign.
    ///
    /// Budget is clamped and metrics are recomputed from the submitted
    /// budget, mix and CTR, so the stored figures always agree with the
    /// estimate formulas. Nothing is written when the request is rejected.
    pub fn launch(&self, request: LaunchRequest) -> CampaignResult<LaunchOutcome> {
        let url = match request.url.as_deref().map(str::trim) {
            Some(u) if !u.is_empty() => u.to_string(),
            _ => return Err(CampaignError::Validation("campaign url is required".to_string())),
        };

        let review = PolicyReview::screen(&request.headline, &request.description, &request.warnings);
        let acknowledged_warnings = review.gate(request.confirmed).inspect_err(|_| {
            warn!(url = %url, "launch blocked pending policy confirmation");
            metrics::counter!("launchpad.launch.blocked").increment(1);
        })?;

        let budget = Budget::clamp_f64(request.budget);
        let ctr = request.ctr.unwrap_or(DEFAULT_CTR);
        let estimate = calculate_metrics(budget.as_f64(), request.publisher_mix, ctr);
        let now = self.clock.now();

        let campaign = Campaign {
            id: now.timestamp_millis().to_string(),
            url,
            keywords: request.selected_topics,
            headline: request.headline,
            description: request.description,
            budget: budget.dollars(),
            publisher_mix: request.publisher_mix,
            cpm: estimate.cpm,
            reach: estimate.reach,
            est_clicks: estimate.est_clicks,
            ctr,
            created_at: now,
        };

        let campaign = self.repository.append(campaign)?;
        let projection = calculate_roas(campaign.est_clicks, budget.as_f64());

        metrics::counter!("launchpad.campaigns.launched").increment(1);
        info!(
            id = %campaign.id,
            url = %campaign.url,
            budget = campaign.budget,
            mix = %campaign.publisher_mix,
            acknowledged = acknowledged_warnings.len(),
            roas = %projection.roas,
            "campaign launched"
        );

        Ok(LaunchOutcome {
            campaign,
            projection,
            acknowledged_warnings,
        })
    }
}
