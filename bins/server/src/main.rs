//! Copro API Server
//!
//! Main entry point for the Copro backend service.

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use copro_api::{AppState, create_router};
use copro_core::owner::OwnershipService;
use copro_core::store::Dataset;
use copro_shared::{AppConfig, LoggingConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load().context("Failed to load configuration")?;

    init_tracing(&config.logging);

    // Load the initial dataset
    let dataset = load_dataset(config.copro.seed_path.as_deref()).await?;
    let weight_total = OwnershipService::weight_total(&dataset.resolved_owners());
    info!(
        copro = %config.copro.name,
        owners = dataset.owners.len(),
        lots = dataset.lots.len(),
        weight_total,
        "Dataset loaded"
    );
    if weight_total != u64::from(config.copro.total_weight) {
        warn!(
            weight_total,
            expected = config.copro.total_weight,
            "Owner weights do not add up to the building total"
        );
    }

    // Create router
    let state = AppState::new(dataset, config.copro.clone());
    let app = create_router(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Installs the global subscriber; `RUST_LOG` wins over the configured filter.
fn init_tracing(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.filter));
    let json = logging.json.then(|| tracing_subscriber::fmt::layer().json());
    let text = (!logging.json).then(tracing_subscriber::fmt::layer);

    tracing_subscriber::registry()
        .with(filter)
        .with(json)
        .with(text)
        .init();
}

/// Reads the seed dataset, or starts empty when no path is configured.
async fn load_dataset(path: Option<&str>) -> anyhow::Result<Dataset> {
    let Some(path) = path else {
        return Ok(Dataset::default());
    };
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read seed file {path}"))?;
    serde_json::from_str(&raw).with_context(|| format!("Invalid seed file {path}"))
}
