//! End-to-end flow: analyze a URL, edit the draft, launch, review the
//! dashboard, then clear the history. Runs against a file-backed store in a
//! scratch directory.

use campaign_context::{generate_context, AnalysisPipeline};
use campaign_core::error::CampaignError;
use campaign_core::types::PublisherMix;
use campaign_management::{
    CampaignRepository, CampaignStore, FileKeyValueStore, LaunchWorkflow, ManualClock,
    WorkspaceDraft, DEFAULT_CAMPAIGNS_KEY,
};
use campaign_reporting::inputs::CtrPreset;
use campaign_reporting::DashboardView;
use std::sync::Arc;

fn file_store(dir: &std::path::Path) -> Arc<CampaignStore> {
    let kv = FileKeyValueStore::open(dir).unwrap();
    Arc::new(CampaignStore::new(Arc::new(kv), DEFAULT_CAMPAIGNS_KEY))
}

#[tokio::test]
async fn test_analyze_edit_launch_and_clear() {
    let dir = tempfile::tempdir().unwrap();
    let store = file_store(dir.path());
    let clock = Arc::new(ManualClock::new(1_700_000_000_123));
    let launcher = LaunchWorkflow::new(store.clone(), clock.clone());

    let bundle = AnalysisPipeline::immediate().run(Some("mikes-coffee.com")).await;
    assert_eq!(bundle, generate_context("mikes-coffee.com"));

    let mut draft = WorkspaceDraft::from_context("mikes-coffee.com", bundle);
    draft.toggle_topic("Espresso");
    draft.toggle_topic("Cafe Culture");
    draft.publisher_mix = PublisherMix::Niche;
    draft.set_ctr(CtrPreset::Average);
    assert_eq!(draft.metrics().est_clicks, 476);

    let outcome = launcher.launch(draft.to_launch_request(false)).unwrap();
    assert_eq!(outcome.campaign.id, "1700000000123");
    assert_eq!(
        outcome.campaign.keywords,
        ["Artisan Brewing", "Coffee", "Cafe Culture"]
    );
    assert_eq!(outcome.campaign.cpm, "3.15");
    assert_eq!(outcome.projection.roas, "2.38");

    let json = serde_json::to_value(&outcome.campaign).unwrap();
    assert_eq!(json["createdAt"], "2023-11-14T22:13:20.123Z");
    assert_eq!(json["publisherMix"], "niche");

    // A fresh store over the same directory sees the launch.
    let reopened = file_store(dir.path());
    let view = DashboardView::build(&reopened.list_all().unwrap());
    assert_eq!(view.len(), 1);
    assert_eq!(view.campaigns[0].short_id, "000123");
    assert_eq!(view.campaigns[0].publisher_label, "Niche Blogs");

    reopened.clear_all().unwrap();
    assert!(store.list_all().unwrap().is_empty());
}

#[tokio::test]
async fn test_flagged_copy_blocks_until_confirmed() {
    let dir = tempfile::tempdir().unwrap();
    let store = file_store(dir.path());
    let launcher = LaunchWorkflow::new(store.clone(), Arc::new(ManualClock::new(1_700_000_000_000)));

    let mut draft = WorkspaceDraft::from_context("fitness.com", generate_context("fitness.com"));
    draft.headline = "Guaranteed results, risk-free".to_string();

    let err = launcher.launch(draft.to_launch_request(false)).unwrap_err();
    match err {
        CampaignError::PolicyConfirmationRequired { warnings } => {
            let words: Vec<_> = warnings.iter().map(|w| w.word.as_str()).collect();
            assert_eq!(words, ["guarantee", "risk-free"]);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(store.list_all().unwrap().is_empty());

    let outcome = launcher.launch(draft.to_launch_request(true)).unwrap();
    assert_eq!(outcome.acknowledged_warnings.len(), 2);
    assert_eq!(store.get_by_id("1700000000000").unwrap(), Some(outcome.campaign));
}
