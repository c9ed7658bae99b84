//! giftd process boundary: load config, open the store, sync the sheet,
//! serve the API, close the store on shutdown.

use anyhow::{Context, Result};
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use giftd::config::Config;
use giftd::notify::EmailNotifier;
use giftd::registry::RegistryStore;
use giftd::rest;
use giftd::sheet::{CsvSheet, RowSource};
use giftd::storage::Storage;
use giftd::AppContext;

#[derive(Parser, Debug)]
#[command(name = "giftd", about = "Gift registry service")]
struct Cli {
    /// Path to giftd.toml.
    #[arg(long, env = "GIFTD_CONFIG", default_value = "giftd.toml")]
    config: PathBuf,

    /// Override the configured listen address.
    #[arg(long)]
    bind: Option<SocketAddr>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let cli = Cli::parse();
    let config = Config::load(&cli.config)?;
    let bind = cli.bind.unwrap_or(config.server.bind);

    let storage = Storage::open(&config.registry.database_path).await?;
    let registry = RegistryStore::new(storage.clone_pool());

    // Seed the registry before accepting traffic, so sync never races
    // early claim requests.
    let rows = CsvSheet::new(&config.registry.sheet_path).read_rows()?;
    registry.sync(&rows).await?;

    let notifier = EmailNotifier::new(config.notify.clone())
        .context("failed to build email notifier")?;

    let ctx = Arc::new(AppContext {
        config,
        registry,
        notifier: Arc::new(notifier),
    });

    let listener = tokio::net::TcpListener::bind(bind)
        .await
        .with_context(|| format!("failed to bind {bind}"))?;
    info!(%bind, "giftd listening");

    axum::serve(listener, rest::router(ctx))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    storage.close().await;
    info!("giftd stopped");
    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    info!("shutdown signal received");
}
