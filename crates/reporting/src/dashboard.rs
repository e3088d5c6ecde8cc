//! Dashboard view over launched campaigns.

use campaign_core::types::{Campaign, PublisherMix, RoasResult};
use serde::Serialize;

use crate::metrics::calculate_roas;

/// Launched campaigns never change state in this tool.
const CAMPAIGN_STATUS: &str = "active";

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CampaignCard {
    pub id: String,
    pub short_id: String,
    pub headline: String,
    pub url: String,
    pub status: &'static str,
    pub created_on: String,
    pub budget: u32,
    pub reach: u64,
    pub est_clicks: u64,
    pub publisher_mix: PublisherMix,
    pub publisher_label: &'static str,
    pub projection: RoasResult,
}

#[derive(Debug, Clone, Serialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub campaigns: Vec<CampaignCard>,
}

impl DashboardView {
    /// Cards in stored (insertion) order.
    pub fn build(campaigns: &[Campaign]) -> Self {
        Self {
            campaigns: campaigns.iter().map(CampaignCard::from_campaign).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.campaigns.is_empty()
    }

    pub fn len(&self) -> usize {
        self.campaigns.len()
    }
}

impl CampaignCard {
    pub fn from_campaign(campaign: &Campaign) -> Self {
        Self {
            id: campaign.id.clone(),
            short_id: short_id(&campaign.id).to_string(),
            headline: campaign.headline.clone(),
            url: campaign.url.clone(),
            status: CAMPAIGN_STATUS,
            created_on: campaign.created_at.format("%Y-%m-%d").to_string(),
            budget: campaign.budget,
            reach: campaign.reach,
            est_clicks: campaign.est_clicks,
            publisher_mix: campaign.publisher_mix,
            publisher_label: campaign.publisher_mix.label(),
            projection: calculate_roas(campaign.est_clicks, f64::from(campaign.budget)),
        }
    }
}

/// Last six characters of a campaign id, as shown on confirmation screens.
pub fn short_id(id: &str) -> &str {
    match id.char_indices().rev().nth(5) {
        Some((start, _)) => &id[start..],
        None => id,
    }
}
