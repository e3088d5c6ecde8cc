//! Editable campaign draft built from a generated context.
//!
//! Holds the marketer's current selections between context generation and
//! launch. Estimates are recomputed from the draft on demand, never cached.

use campaign_core::types::{ContextBundle, MetricsResult, PublisherMix};
use campaign_reporting::inputs::{Budget, CtrPreset};
use campaign_reporting::metrics::calculate_metrics;
use serde::{Deserialize, Serialize};

use crate::launch::LaunchRequest;

/// Topics pre-selected from the front of the generated list.
pub const DEFAULT_SELECTED_TOPICS: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceDraft {
    pub url: String,
    pub context: ContextBundle,
    pub selected_topics: Vec<String>,
    pub publisher_mix: PublisherMix,
    pub budget: Budget,
    pub ctr: f64,
    pub headline: String,
    pub description: String,
}

impl WorkspaceDraft {
    pub fn from_context(url: impl Into<String>, context: ContextBundle) -> Self {
        Self {
            url: url.into(),
            selected_topics: context
                .topics
                .iter()
                .take(DEFAULT_SELECTED_TOPICS)
                .cloned()
                .collect(),
            publisher_mix: PublisherMix::default(),
            budget: Budget::default(),
            ctr: CtrPreset::default().rate(),
            headline: context.suggested_headline.clone(),
            description: context.suggested_description.clone(),
            context,
        }
    }

    /// Deselect a selected topic, otherwise append it to the selection.
    pub fn toggle_topic(&mut self, topic: &str) {
        if let Some(pos) = self.selected_topics.iter().position(|t| t == topic) {
            self.selected_topics.remove(pos);
        } else {
            self.selected_topics.push(topic.to_string());
        }
    }

    pub fn set_budget(&mut self, dollars: i64) {
        self.budget = Budget::clamp(dollars);
    }

    pub fn set_ctr(&mut self, preset: CtrPreset) {
        self.ctr = preset.rate();
    }

    pub fn metrics(&self) -> MetricsResult {
        calculate_metrics(self.budget.as_f64(), self.publisher_mix, self.ctr)
    }

    pub fn to_launch_request(&self, confirmed: bool) -> LaunchRequest {
        LaunchRequest {
            url: Some(self.url.clone()),
            selected_topics: self.selected_topics.clone(),
            publisher_mix: self.publisher_mix,
            budget: self.budget.as_f64(),
            ctr: Some(self.ctr),
            headline: self.headline.clone(),
            description: self.description.clone(),
            warnings: self.context.warnings.clone(),
            confirmed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use campaign_context::generate_context;

    fn coffee_draft() -> WorkspaceDraft {
        WorkspaceDraft::from_context("mikes-coffee.com", generate_context("mikes-coffee.com"))
    }

    #[test]
    fn test_defaults_from_context() {
        let draft = coffee_draft();
        assert_eq!(draft.selected_topics, ["Artisan Brewing", "Espresso", "Coffee"]);
        assert_eq!(draft.headline, "Artisan Coffee at Your Doorstep");
        assert_eq!(draft.publisher_mix, PublisherMix::Premium);
        assert_eq!(draft.budget.dollars(), 100);
        assert_eq!(draft.ctr, 0.015);
    }

    #[test]
    fn test_toggle_topic() {
        let mut draft = coffee_draft();
        draft.toggle_topic("Espresso");
        assert_eq!(draft.selected_topics, ["Artisan Brewing", "Coffee"]);
        draft.toggle_topic("Cafe Culture");
        draft.toggle_topic("Espresso");
        assert_eq!(draft.selected_topics, ["Artisan Brewing", "Coffee", "Cafe Culture", "Espresso"]);
    }

    #[test]
    fn test_metrics_follow_edits() {
        let mut draft = coffee_draft();
        assert_eq!(draft.metrics().est_clicks, 208);

        draft.publisher_mix = PublisherMix::Niche;
        assert_eq!(draft.metrics().reach, 31746);

        draft.set_budget(5);
        assert_eq!(draft.budget.dollars(), 10);
        draft.set_budget(2500);
        assert_eq!(draft.budget.dollars(), 1000);

        draft.set_ctr(CtrPreset::Optimistic);
        assert_eq!(draft.ctr, 0.02);
    }

    #[test]
    fn test_launch_request_carries_selections() {
        let mut draft = coffee_draft();
        draft.headline = "Clinically roasted".to_string();
        let request = draft.to_launch_request(false);
        assert_eq!(request.url.as_deref(), Some("mikes-coffee.com"));
        assert_eq!(request.budget, 100.0);
        assert_eq!(request.headline, "Clinically roasted");
        assert!(!request.confirmed);
    }
}
