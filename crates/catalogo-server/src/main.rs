//! Server binary for the Catalogo roulette catalog.
//!
//! Wires the two long-running tasks together over one shared database
//! pool: the collector loop (poll the upstream feed, classify, persist)
//! and the query API (serve windowed results and statistics). Ctrl-C
//! flips a watch-channel shutdown flag observed by both tasks.
//!
//! # Startup Sequence
//!
//! 1. Initialize structured logging (tracing)
//! 2. Load configuration from the environment
//! 3. Connect to `PostgreSQL` and run migrations
//! 4. Spawn the query API server
//! 5. Spawn the collector loop
//! 6. Wait for Ctrl-C, signal shutdown, drain both tasks
//! 7. Close the pool

mod config;
mod error;

use std::sync::Arc;

use catalogo_api::{start_server, AppState};
use catalogo_collector::run_collector;
use catalogo_db::{PostgresConfig, PostgresPool};
use tokio::sync::watch;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::ServerSettings;
use crate::error::StartupError;

/// Application entry point.
///
/// # Errors
///
/// Returns an error if any initialization step fails; runtime task
/// failures are logged and trigger shutdown instead.
#[tokio::main]
async fn main() -> Result<(), StartupError> {
    // 1. Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("catalogo-server starting");

    // 2. Load configuration.
    let settings = ServerSettings::from_env()?;
    info!(
        api_host = settings.api.host,
        api_port = settings.api.port,
        feed_url = settings.collector.feed_url,
        poll_interval_secs = settings.collector.poll_interval.as_secs(),
        "Configuration loaded"
    );

    // 3. Connect to PostgreSQL and run migrations.
    let pool = PostgresPool::connect(&PostgresConfig::new(&settings.database_url)).await?;
    pool.run_migrations().await?;

    // 4. Spawn the query API server.
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let api_state = Arc::new(AppState::new(pool.clone()));
    let api_config = settings.api.clone();
    let api_shutdown = shutdown_rx.clone();
    let mut api_handle =
        tokio::spawn(async move { start_server(&api_config, api_state, api_shutdown).await });

    // 5. Spawn the collector loop.
    let collector_handle = tokio::spawn(run_collector(
        pool.clone(),
        settings.collector.clone(),
        shutdown_rx,
    ));

    info!("Collector and query API running");

    // 6. Wait for Ctrl-C (or an early API exit), then signal shutdown.
    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("Ctrl-C received, shutting down");
            let _ = shutdown_tx.send(true);
            match api_handle.await {
                Ok(Ok(())) => info!("Query API stopped"),
                Ok(Err(e)) => error!(error = %e, "Query API exited with error"),
                Err(e) => error!(error = %e, "Query API task failed"),
            }
        }
        result = &mut api_handle => {
            match result {
                Ok(Ok(())) => warn!("Query API exited before shutdown was requested"),
                Ok(Err(e)) => error!(error = %e, "Query API failed"),
                Err(e) => error!(error = %e, "Query API task failed"),
            }
            let _ = shutdown_tx.send(true);
        }
    }

    if collector_handle.await.is_err() {
        error!("Collector task failed");
    }

    // 7. Close the pool.
    pool.close().await;
    info!("catalogo-server shutdown complete");

    Ok(())
}
