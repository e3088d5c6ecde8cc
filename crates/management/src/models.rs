//! Request and response bodies for the launchpad REST API.

use campaign_core::error::CampaignError;
use campaign_core::types::{MetricsResult, PolicyWarning, PublisherMix};
use campaign_reporting::inputs::Budget;
use serde::{Deserialize, Serialize};

use crate::workspace::WorkspaceDraft;

// ─── Context ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContextRequest {
    #[serde(default)]
    pub url: Option<String>,
}

/// Generated context plus the draft defaults and their estimates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextResponse {
    #[serde(flatten)]
    pub draft: WorkspaceDraft,
    pub metrics: MetricsResult,
}

// ─── Estimates ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsRequest {
    #[serde(default)]
    pub budget: Budget,
    #[serde(default)]
    pub publisher_mix: PublisherMix,
    #[serde(default)]
    pub ctr: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoasRequest {
    pub est_clicks: u64,
    pub budget: f64,
}

// ─── Policy ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyRequest {
    #[serde(default)]
    pub text: String,
}

// ─── Errors ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<PolicyWarning>,
}

impl ErrorResponse {
    pub fn new(error: &str, message: impl Into<String>) -> Self {
        Self {
            error: error.to_string(),
            message: message.into(),
            warnings: Vec::new(),
        }
    }
}

impl From<CampaignError> for ErrorResponse {
    fn from(err: CampaignError) -> Self {
        let message = err.to_string();
        match err {
            CampaignError::Validation(_) => Self::new("invalid_request", message),
            CampaignError::NotFound(_) => Self::new("not_found", message),
            CampaignError::PolicyConfirmationRequired { warnings } => Self {
                error: "policy_confirmation_required".to_string(),
                message,
                warnings,
            },
            CampaignError::Serialization(_) => Self::new("corrupt_store", message),
            CampaignError::Config(_)
            | CampaignError::Storage(_)
            | CampaignError::Io(_)
            | CampaignError::Internal(_) => Self::new("internal_error", message),
        }
    }
}
