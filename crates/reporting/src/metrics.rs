//! Closed-form delivery and return estimates.
//!
//! Base CPM = $4.50, scaled by the publisher mix (premium ×1.6, niche ×0.7).
//! Reach = floor(budget / CPM × 1000), clicks = round(reach × CTR),
//! CPC = budget / clicks (0 when there are no clicks).

use campaign_core::format::{round_half_up, to_fixed};
use campaign_core::types::{MetricsResult, PublisherMix, RoasResult};

pub const BASE_CPM: f64 = 4.50;
pub const DEFAULT_CTR: f64 = 0.015;
pub const AVERAGE_ORDER_VALUE: f64 = 25.0;
pub const CONVERSION_RATE: f64 = 0.02;

pub fn effective_cpm(mix: PublisherMix) -> f64 {
    BASE_CPM * mix.cpm_multiplier()
}

/// Estimate CPM, reach, clicks and CPC for a budget.
///
/// Total over its inputs: negative or non-finite intermediate counts
/// saturate to zero and a zero click estimate prices CPC at zero.
pub fn calculate_metrics(budget: f64, mix: PublisherMix, ctr: f64) -> MetricsResult {
    let cpm = effective_cpm(mix);

    // `as` saturates: NaN and negatives become 0.
    let reach = ((budget / cpm) * 1000.0).floor() as u64;
    let est_clicks = round_half_up(reach as f64 * ctr) as u64;

    let cpc = if est_clicks > 0 {
        budget / est_clicks as f64
    } else {
        0.0
    };

    MetricsResult {
        cpm: to_fixed(cpm, 2),
        reach,
        est_clicks,
        cpc: to_fixed(cpc, 2),
    }
}

/// Project sales, revenue and ROAS from estimated clicks.
///
/// Sales keep one decimal while revenue and ROAS keep two; stored
/// projections were published with this mix of precisions.
pub fn calculate_roas(est_clicks: u64, budget: f64) -> RoasResult {
    let est_sales = est_clicks as f64 * CONVERSION_RATE;
    let est_revenue = est_sales * AVERAGE_ORDER_VALUE;
    let roas = if budget > 0.0 { est_revenue / budget } else { 0.0 };

    RoasResult {
        est_sales: to_fixed(est_sales, 1),
        est_revenue: to_fixed(est_revenue, 2),
        roas: to_fixed(roas, 2),
    }
}
