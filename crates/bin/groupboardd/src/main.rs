//! # groupboardd — groupboard daemon
//!
//! Composition root that wires all adapters together and starts the server.
//!
//! ## Responsibilities
//! - Load configuration (`groupboardd.toml`, environment overrides)
//! - Initialise `tracing` from the configured filter
//! - Open the `SQLite` pool and run migrations
//! - Construct the snapshot repository and service
//! - Build the axum router, bind to a TCP port and serve
//! - Shut down gracefully on Ctrl-C
//!
//! ## Dependency rule
//! This is the **only** server crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod config;

use groupboard_adapter_http_axum::state::AppState;
use groupboard_adapter_storage_sqlite_sqlx::{Config as DbConfig, SqliteSnapshotRepository};
use groupboard_app::services::snapshot_service::SnapshotService;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.logging.filter))
        .init();

    // Database
    let db = DbConfig {
        database_url: config.database.url.clone(),
    }
    .build()
    .await?;
    let repo = SqliteSnapshotRepository::new(db.pool().clone());

    // Services
    let service = SnapshotService::new(repo, config.groups.valid.clone());
    tracing::info!(groups = ?service.valid_groups(), "accepting readings");

    // HTTP
    let state = AppState::new(service, config.server.refresh_secs);
    let app = groupboard_adapter_http_axum::router::build(state);

    let listener = tokio::net::TcpListener::bind(&config.server.bind).await?;
    tracing::info!(addr = %config.server.bind, "groupboardd listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("groupboardd stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(%err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
