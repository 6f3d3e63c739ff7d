//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`GroupBoardError`] at port boundaries.

/// Top-level error crossing port boundaries.
#[derive(Debug, thiserror::Error)]
pub enum GroupBoardError {
    /// A domain invariant was violated.
    #[error("validation error")]
    Validation(#[from] ValidationError),

    /// The persistence layer failed.
    #[error("storage error")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Fetching a remote resource failed (network or decode).
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Writing to a rendering target failed.
    #[error("view error: {0}")]
    View(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Domain invariant violations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A reading arrived without `group_id` or `sensor_data`.
    #[error("Missing required fields")]
    MissingFields,

    /// The group is not part of the configured roster.
    #[error("Invalid group ID")]
    InvalidGroup {
        /// The rejected identifier.
        group_id: String,
    },

    /// A snapshot was built with an empty group identifier.
    #[error("group id must not be empty")]
    EmptyGroupId,

    /// A snapshot timestamp was NaN or infinite.
    #[error("timestamp must be a finite number of seconds")]
    NonFiniteTimestamp,
}
