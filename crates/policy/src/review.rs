use campaign_core::error::{CampaignError, CampaignResult};
use campaign_core::types::PolicyWarning;
use serde::Serialize;

use crate::filter::check_policy;

/// Everything flagged on a campaign's final copy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PolicyReview {
    pub warnings: Vec<PolicyWarning>,
}

impl PolicyReview {
    /// Headline findings first, then description, then any warnings carried
    /// over from context generation. Duplicates across fields are kept.
    pub fn screen(headline: &str, description: &str, carried: &[PolicyWarning]) -> Self {
        let mut warnings = check_policy(headline);
        warnings.extend(check_policy(description));
        warnings.extend_from_slice(carried);
        Self { warnings }
    }

    pub fn requires_confirmation(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Let the launch through when the copy is clean or the advertiser has
    /// certified the claims.
    pub fn gate(self, confirmed: bool) -> CampaignResult<Vec<PolicyWarning>> {
        if self.requires_confirmation() && !confirmed {
            return Err(CampaignError::PolicyConfirmationRequired {
                warnings: self.warnings,
            });
        }
        Ok(self.warnings)
    }
}
