//! # groupboard-adapter-http-client
//!
//! [`DashboardSource`] implementation over HTTP, built on
//! [reqwest](https://docs.rs/reqwest).
//!
//! ## Behaviour
//! - `GET {base_url}/api/dashboard`, no parameters, no authentication
//! - The body is decoded whatever the HTTP status: the server answers
//!   failures with `{"error": ...}`, which decodes as a non-success response
//!   and is left to the poller to ignore
//! - Connection failures and undecodable bodies are transport errors
//! - No retries; the next poll is the retry
//!
//! ## Dependency rule
//! Depends on `groupboard-app` (for the port trait) and `groupboard-domain`.

mod error;

use std::time::Duration;

use reqwest::{Client, ClientBuilder};

use groupboard_app::ports::DashboardSource;
use groupboard_domain::dashboard::DashboardResponse;
use groupboard_domain::error::GroupBoardError;

pub use error::ClientError;

/// Path of the dashboard endpoint, relative to the server root.
pub const DASHBOARD_PATH: &str = "/api/dashboard";

const USER_AGENT: &str = concat!("groupboard-poll/", env!("CARGO_PKG_VERSION"));

/// Fetches [`DashboardResponse`]s from a groupboard server.
#[derive(Debug, Clone)]
pub struct HttpDashboardSource {
    client: Client,
    url: String,
}

impl HttpDashboardSource {
    /// Create a source for the server at `base_url`.
    ///
    /// Without `timeout` the transport's defaults apply.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Build`] if the HTTP client cannot be created.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, ClientError> {
        let mut builder = ClientBuilder::new().user_agent(USER_AGENT);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build().map_err(ClientError::Build)?,
            url: build_url(base_url, DASHBOARD_PATH),
        })
    }

    /// The full URL this source polls.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    async fn fetch_response(&self) -> Result<DashboardResponse, ClientError> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(ClientError::Request)?;

        let status = response.status();
        let body = response.bytes().await.map_err(ClientError::Request)?;
        let decoded = serde_json::from_slice(&body).map_err(|source| ClientError::Decode {
            status: status.as_u16(),
            source,
        })?;
        if !status.is_success() {
            tracing::debug!(status = status.as_u16(), "dashboard endpoint answered with an error status");
        }
        Ok(decoded)
    }
}

impl DashboardSource for HttpDashboardSource {
    async fn fetch(&self) -> Result<DashboardResponse, GroupBoardError> {
        Ok(self.fetch_response().await?)
    }
}

fn build_url(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
