//! Cardio Daemon - cardiovascular risk scoring over HTTP
//!
//! Loads the model artifacts once, then serves predictions. A failed load
//! does not stop the daemon: info and health endpoints stay up and
//! `/predict` answers 500 until restarted with usable artifacts.

use anyhow::Result;
use cardio_common::ArtifactStore;
use cardiod::config::CardiodConfig;
use cardiod::metrics::PredictionMetrics;
use cardiod::server::{self, AppState};
use clap::Parser;
use std::path::PathBuf;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "cardiod")]
#[command(about = "Cardiovascular risk prediction service", long_about = None)]
#[command(version)]
struct Cli {
    /// Config file (default: $CARDIOD_CONFIG or /etc/cardio/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Artifact directory, overriding the config file
    #[arg(long)]
    artifacts: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    info!("Cardio Daemon v{} starting", env!("CARGO_PKG_VERSION"));

    let mut config = CardiodConfig::load(cli.config.as_deref())?;
    if let Some(dir) = cli.artifacts {
        config.artifacts.dir = dir;
    }

    let paths = config.artifacts.paths();
    let artifacts = match ArtifactStore::load(&paths) {
        Ok(store) => Some(store),
        Err(e) => {
            error!("Error loading model: {}", e);
            error!("Serving without a model; /predict will fail until restart");
            None
        }
    };

    let metrics = PredictionMetrics::new()?;
    let state = AppState::new(artifacts, metrics);

    server::run(state, &config).await
}
