//! # groupboard-poll — dashboard poller
//!
//! Composition root for the polling dashboard.
//!
//! ## Responsibilities
//! - Load configuration (`groupboard-poll.toml`, environment overrides)
//! - Initialise `tracing` from the configured filter
//! - Construct the HTTP dashboard source and the HTML file page
//! - Select the recency strategy and build the poller
//! - Poll until Ctrl-C
//!
//! ## Dependency rule
//! Wiring only — no domain logic belongs here.

mod config;

use groupboard_adapter_http_client::HttpDashboardSource;
use groupboard_adapter_page_file::FilePage;
use groupboard_app::poller::DashboardPoller;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.logging.filter))
        .init();

    let source = HttpDashboardSource::new(&config.poller.base_url, config.request_timeout())?;
    let page = FilePage::new(&config.poller.output, config.page_refresh());
    page.initialize()?;

    tracing::info!(
        url = source.url(),
        output = %page.path().display(),
        recency = %config.poller.recency,
        "groupboard-poll starting"
    );

    let poller = DashboardPoller::new(source, page, config.poller.recency.build());

    tokio::select! {
        () = poller.run(config.interval()) => {}
        result = tokio::signal::ctrl_c() => {
            result?;
            tracing::info!("shutdown signal received");
        }
    }

    tracing::info!("groupboard-poll stopped");
    Ok(())
}
