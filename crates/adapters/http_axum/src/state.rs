//! Shared application state for axum handlers.

use std::sync::Arc;

use groupboard_app::ports::SnapshotRepository;
use groupboard_app::services::snapshot_service::SnapshotService;

/// Application state shared across all axum handlers.
///
/// Generic over the repository type to avoid dynamic dispatch.
/// `Clone` is implemented manually so the repository itself does not
/// need to be `Clone` — only the `Arc` wrapper is cloned.
pub struct AppState<R> {
    /// Ingest and query service.
    pub snapshot_service: Arc<SnapshotService<R>>,
    /// Auto-reload cadence of the server-rendered dashboard, in seconds.
    pub refresh_secs: u32,
}

impl<R> Clone for AppState<R> {
    fn clone(&self) -> Self {
        Self {
            snapshot_service: Arc::clone(&self.snapshot_service),
            refresh_secs: self.refresh_secs,
        }
    }
}

impl<R> AppState<R>
where
    R: SnapshotRepository + Send + Sync + 'static,
{
    /// Create a new application state from a service instance.
    pub fn new(snapshot_service: SnapshotService<R>, refresh_secs: u32) -> Self {
        Self {
            snapshot_service: Arc::new(snapshot_service),
            refresh_secs,
        }
    }
}
