//! Campaign launchpad backend: workspace drafts, the launch workflow,
//! persisted campaign history and the REST API that exposes them.
//!
//! Campaigns live in a single JSON blob behind a [`KeyValueStore`], either
//! in memory or as a file under the configured data directory.

pub mod clock;
pub mod handlers;
pub mod kv;
pub mod launch;
pub mod models;
pub mod router;
pub mod store;
pub mod workspace;

pub use clock::{Clock, ManualClock, SystemClock};
pub use handlers::{run_blocking, ManagementState};
pub use kv::{FileKeyValueStore, KeyValueStore, MemoryKeyValueStore};
pub use launch::{LaunchOutcome, LaunchRequest, LaunchWorkflow};
pub use router::management_router;
pub use store::{CampaignRepository, CampaignStore, DEFAULT_CAMPAIGNS_KEY};
pub use workspace::WorkspaceDraft;
