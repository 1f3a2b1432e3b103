//! Divine Flavours order backend
//!
//! Reads configuration from the YAML file named by `DIVINE_FLAVOURS_CONFIG`
//! (if any) and the environment, picks the order store and serves HTTP until
//! SIGTERM or Ctrl+C.

use anyhow::{Context, Result};
use divine_flavours::config::AppConfig;
use divine_flavours::server::ServerBuilder;
use divine_flavours::storage;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,divine_flavours=debug")),
        )
        .init();

    let config = AppConfig::load()?;

    let order_store = storage::from_config(&config.database)
        .await
        .context("failed to set up the order store")?;

    tracing::info!(
        "Starting {} v{} on {}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        config.bind_addr()
    );

    ServerBuilder::new()
        .with_config(config)
        .with_order_store(order_store)
        .serve()
        .await
}
