// src/main.rs
use anyhow::{Context, Result};
use clap::Parser;
use indicator_analysis::backend::Availability;
use indicator_analysis::catalog::Catalog;
use indicator_analysis::cli::{execute_command, Cli};
use indicator_analysis::config::Settings;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize environment
    dotenv::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Parse command line arguments
    let cli = Cli::parse();

    let settings = Settings::load().context("Failed to load settings")?;

    if let Err(e) = rayon::ThreadPoolBuilder::new()
        .num_threads(settings.worker_threads())
        .build_global()
    {
        warn!("Keeping the existing worker pool: {}", e);
    }

    // Detect backends and validate the catalog before doing any work
    let availability = Availability::init(&settings.disabled_backends());
    let catalog = Catalog::global().context("Indicator catalog is invalid")?;
    info!(
        "{} indicators in catalog, backends available: {}",
        catalog.len(),
        availability
            .available()
            .map(|b| b.id())
            .collect::<Vec<_>>()
            .join(", ")
    );

    execute_command(cli.command, &settings).await
}
