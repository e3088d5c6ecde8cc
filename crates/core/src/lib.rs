pub mod config;
pub mod error;
pub mod format;
pub mod types;

pub use config::AppConfig;
pub use error::{CampaignError, CampaignResult};
