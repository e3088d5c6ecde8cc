//! Campaign estimates: delivery metrics, ROAS projection, budget/CTR input
//! rules and the dashboard view over launched campaigns.

pub mod dashboard;
pub mod inputs;
pub mod metrics;

pub use dashboard::{CampaignCard, DashboardView};
pub use inputs::{parse_ctr, Budget, CtrOption, CtrPreset};
pub use metrics::{calculate_metrics, calculate_roas, effective_cpm};
