//! HydroMonitor API Server
//!
//! Run with: cargo run --bin hydromonitor-api
//!
//! # Configuration
//!
//! Reads the first config file found (`--config`, then the usual locations)
//! and applies environment overrides:
//! - `HYDRO_API_HOST`: Host to bind to (default: 0.0.0.0)
//! - `HYDRO_API_PORT`: Port to listen on (default: 5000)
//! - `HYDRO_DATA_DIR`: Directory for the readings snapshot
//! - `HYDRO_LOG_LEVEL` / `HYDRO_LOG_FORMAT`: Logging
//! - `RUST_LOG`: Overrides the log filter entirely

use anyhow::Context;
use clap::Parser;
use hydromonitor::api::{serve, AppState};
use hydromonitor::config::Config;
use hydromonitor::logging;
use hydromonitor::storage::ReadingStore;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "hydromonitor-api")]
#[command(about = "HydroMonitor readings server", version)]
struct Args {
    /// Config file path
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Override the listen port
    #[arg(long, short)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = Config::resolve(args.config.as_deref())?;
    if let Some(port) = args.port {
        config.api.port = port;
    }

    logging::init(&config.logging)?;

    tracing::info!("Starting HydroMonitor API server v{}", env!("CARGO_PKG_VERSION"));

    let storage_config = config.storage_config();
    tracing::info!("Data directory: {:?}", storage_config.data_dir);
    tracing::info!("Persist snapshot: {}", storage_config.persist);

    let store = Arc::new(
        ReadingStore::open(&storage_config)
            .await
            .context("Failed to open reading store")?,
    );
    tracing::info!("Reading store ready with {} readings", store.len().await);

    let state = AppState::new(store, config.api.clone());

    tracing::info!("Starting server on {}:{}", config.api.host, config.api.port);
    serve(state, &config.api).await?;

    tracing::info!("HydroMonitor API server stopped");
    Ok(())
}
