//! presskit server entry point.
//!
//! Loads configuration, opens the cache and serves HTTP until interrupted.
//! Logs are JSON lines on stderr, filtered by `RUST_LOG` (default `info`).

use anyhow::Result;
use presskit_core::{AppConfig, CacheDb};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

mod enrich;
mod error;
mod layout;
mod routes;
mod state;

use state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .json()
        .init();

    let config = AppConfig::load()?;
    let addr = config.listen_addr;
    let cache = CacheDb::open(&config.db_path).await?;
    tracing::info!(db_path = %config.db_path.display(), "cache opened");

    let state = AppState::new(config, cache)?;
    let app = routes::build_router(state);

    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "Starting presskit server");

    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;

    tracing::info!("presskit server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
