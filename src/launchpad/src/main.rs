//! Launchpad: turn a business URL into a ready-to-launch ad campaign.
//!
//! `serve` runs the REST API; the other subcommands are one-shot tools that
//! share the same configuration and campaign history.

use campaign_api::ApiServer;
use campaign_context::AnalysisPipeline;
use campaign_core::config::{AppConfig, StorageBackend};
use campaign_core::types::{MetricsResult, PublisherMix, RoasResult};
use campaign_management::{
    CampaignRepository, CampaignStore, FileKeyValueStore, KeyValueStore, ManagementState,
    MemoryKeyValueStore, SystemClock,
};
use campaign_reporting::inputs::{parse_ctr, Budget, CtrPreset};
use campaign_reporting::metrics::{calculate_metrics, calculate_roas, DEFAULT_CTR};
use campaign_reporting::DashboardView;
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::sync::Arc;
use tracing::{error, info, warn};

const DEFAULT_LOG_FILTER: &str = "campaign_launchpad=info,campaign_management=info,tower_http=info";

#[derive(Parser, Debug)]
#[command(name = "campaign-launchpad")]
#[command(about = "Generate, estimate and launch contextual ad campaigns")]
#[command(version)]
struct Cli {
    /// Directory holding the campaign history (overrides config)
    #[arg(long, global = true, env = "LAUNCHPAD__STORAGE__DATA_DIR")]
    data_dir: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API
    Serve {
        /// Bind address (overrides config)
        #[arg(long, env = "LAUNCHPAD__API__HOST")]
        host: Option<String>,

        /// HTTP port (overrides config)
        #[arg(long, env = "LAUNCHPAD__API__HTTP_PORT")]
        http_port: Option<u16>,

        /// Keep campaigns in memory only
        #[arg(long, default_value_t = false)]
        memory: bool,
    },

    /// Generate ad context for a URL and print it as JSON
    Analyze {
        /// Business or product URL (defaults to the configured URL)
        url: Option<String>,

        /// Skip the simulated analysis pacing
        #[arg(long, default_value_t = false)]
        no_delay: bool,
    },

    /// Print reach, clicks and ROAS estimates for a budget
    Estimate {
        /// Budget in dollars, clamped to 10..=1000
        #[arg(short, long, default_value = "100")]
        budget: String,

        /// Publisher mix: premium or niche
        #[arg(short, long, default_value = "premium")]
        mix: PublisherMix,

        /// Click-through rate: conservative, average, optimistic or a rate such as 0.018
        #[arg(long, value_parser = parse_ctr)]
        ctr: Option<f64>,
    },

    /// Inspect or clear the campaign history
    Campaigns {
        #[command(subcommand)]
        action: CampaignAction,
    },
}

#[derive(Subcommand, Debug)]
enum CampaignAction {
    /// List launched campaigns as dashboard cards
    List,
    /// Show one campaign record
    Show { id: String },
    /// Delete every stored campaign
    Clear,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct EstimateReport {
    budget: Budget,
    publisher_mix: PublisherMix,
    ctr: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    ctr_preset: Option<CtrPreset>,
    metrics: MetricsResult,
    projection: RoasResult,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(matches!(cli.command, Commands::Serve { .. }));

    let mut config = AppConfig::load().unwrap_or_else(|e| {
        warn!(error = %e, "Failed to load config, using defaults");
        AppConfig::default()
    });
    if let Some(dir) = cli.data_dir {
        config.storage.data_dir = dir;
    }

    match cli.command {
        Commands::Serve {
            host,
            http_port,
            memory,
        } => {
            if let Some(host) = host {
                config.api.host = host;
            }
            if let Some(port) = http_port {
                config.api.http_port = port;
            }
            if memory {
                config.storage.backend = StorageBackend::Memory;
            }
            config.validate()?;
            cmd_serve(config).await
        }
        Commands::Analyze { url, no_delay } => {
            if no_delay {
                config.analysis.step_delay_ms = 0;
            }
            cmd_analyze(&config, url).await
        }
        Commands::Estimate { budget, mix, ctr } => cmd_estimate(&budget, mix, ctr),
        Commands::Campaigns { action } => cmd_campaigns(&config, action),
    }
}

fn init_tracing(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.compact().init();
    }
}

fn build_store(config: &AppConfig) -> anyhow::Result<Arc<CampaignStore>> {
    let kv: Arc<dyn KeyValueStore> = match config.storage.backend {
        StorageBackend::Memory => Arc::new(MemoryKeyValueStore::new()),
        StorageBackend::File => Arc::new(FileKeyValueStore::open(&config.storage.data_dir)?),
    };
    Ok(Arc::new(CampaignStore::new(
        kv,
        config.storage.campaigns_key.clone(),
    )))
}

async fn cmd_serve(config: AppConfig) -> anyhow::Result<()> {
    info!(
        host = %config.api.host,
        http_port = config.api.http_port,
        backend = ?config.storage.backend,
        data_dir = %config.storage.data_dir,
        "Configuration loaded"
    );

    let store = build_store(&config)?;
    let state = ManagementState::new(
        store,
        Arc::new(SystemClock),
        AnalysisPipeline::new(&config.analysis),
    );
    let api_server = ApiServer::new(config, state);

    if let Err(e) = api_server.start_metrics() {
        error!(error = %e, "Failed to start metrics exporter");
    }

    info!("Launchpad is ready to serve traffic");
    api_server.start_http().await
}

async fn cmd_analyze(config: &AppConfig, url: Option<String>) -> anyhow::Result<()> {
    let pipeline = AnalysisPipeline::new(&config.analysis);
    let bundle = pipeline.run(url.as_deref()).await;
    println!("{}", serde_json::to_string_pretty(&bundle)?);
    Ok(())
}

fn cmd_estimate(raw_budget: &str, mix: PublisherMix, ctr: Option<f64>) -> anyhow::Result<()> {
    let budget = Budget::parse_clamped(raw_budget);
    let ctr = ctr.unwrap_or(DEFAULT_CTR);
    let metrics = calculate_metrics(budget.as_f64(), mix, ctr);
    let projection = calculate_roas(metrics.est_clicks, budget.as_f64());
    let report = EstimateReport {
        budget,
        publisher_mix: mix,
        ctr,
        ctr_preset: CtrPreset::from_rate(ctr),
        metrics,
        projection,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn cmd_campaigns(config: &AppConfig, action: CampaignAction) -> anyhow::Result<()> {
    config.validate()?;
    let store = build_store(config)?;
    match action {
        CampaignAction::List => {
            let view = DashboardView::build(&store.list_all()?);
            if view.is_empty() {
                eprintln!("No campaigns launched yet.");
            }
            println!("{}", serde_json::to_string_pretty(&view)?);
        }
        CampaignAction::Show { id } => match store.get_by_id(&id)? {
            Some(campaign) => println!("{}", serde_json::to_string_pretty(&campaign)?),
            None => anyhow::bail!("campaign {id} not found"),
        },
        CampaignAction::Clear => {
            store.clear_all()?;
            info!(key = store.key(), "campaign history cleared");
            println!("Campaign history cleared.");
        }
    }
    Ok(())
}
