//! HTTP client adapter error types.

use groupboard_domain::error::GroupBoardError;

/// Errors specific to fetching the dashboard over HTTP.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The reqwest client could not be constructed.
    #[error("failed to build HTTP client")]
    Build(#[source] reqwest::Error),

    /// The request failed or the body could not be read.
    #[error("dashboard request failed: {0}")]
    Request(#[source] reqwest::Error),

    /// The body was not a dashboard response.
    #[error("failed to decode dashboard response (HTTP {status}): {source}")]
    Decode {
        status: u16,
        #[source]
        source: serde_json::Error,
    },
}

impl From<ClientError> for GroupBoardError {
    fn from(err: ClientError) -> Self {
        Self::Transport(Box::new(err))
    }
}
