use crate::error::{CampaignError, CampaignResult};
use serde::Deserialize;
use std::net::IpAddr;

/// Root application configuration. Loaded from an optional `launchpad.toml`
/// and environment variables with the prefix `LAUNCHPAD__`.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub metrics: MetricsConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub analysis: AnalysisConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_http_port")]
    pub http_port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MetricsConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_metrics_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Memory,
    File,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_storage_backend")]
    pub backend: StorageBackend,
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    #[serde(default = "default_campaigns_key")]
    pub campaigns_key: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisConfig {
    /// Pause between the simulated analysis steps. Zero disables pacing.
    #[serde(default = "default_step_delay_ms")]
    pub step_delay_ms: u64,
    /// URL analyzed when a request arrives without one.
    #[serde(default = "default_url")]
    pub default_url: String,
}

// Default functions
fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_http_port() -> u16 {
    8080
}
fn default_metrics_port() -> u16 {
    9091
}
fn default_storage_backend() -> StorageBackend {
    StorageBackend::File
}
fn default_data_dir() -> String {
    ".launchpad".to_string()
}
fn default_campaigns_key() -> String {
    "medianet_campaigns".to_string()
}
fn default_step_delay_ms() -> u64 {
    1000
}
fn default_url() -> String {
    "example.com".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            http_port: default_http_port(),
        }
    }
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            port: default_metrics_port(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: default_storage_backend(),
            data_dir: default_data_dir(),
            campaigns_key: default_campaigns_key(),
        }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            step_delay_ms: default_step_delay_ms(),
            default_url: default_url(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            metrics: MetricsConfig::default(),
            storage: StorageConfig::default(),
            analysis: AnalysisConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables and an optional config file.
    pub fn load() -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            .add_source(config::File::with_name("launchpad").required(false))
            .add_source(
                config::Environment::with_prefix("LAUNCHPAD")
                    .separator("__")
                    .try_parsing(true),
            );

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Reject settings that would only fail later, at bind or first write.
    pub fn validate(&self) -> CampaignResult<()> {
        if self.api.host.parse::<IpAddr>().is_err() {
            return Err(CampaignError::Config(format!(
                "api.host must be an IP address, got {:?}",
                self.api.host
            )));
        }
        if self.storage.campaigns_key.trim().is_empty() {
            return Err(CampaignError::Config("storage.campaigns_key is empty".to_string()));
        }
        if self.storage.backend == StorageBackend::File && self.storage.data_dir.trim().is_empty() {
            return Err(CampaignError::Config("storage.data_dir is empty".to_string()));
        }
        Ok(())
    }
}
