//! JSON REST API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod dashboard;
#[allow(clippy::missing_errors_doc)]
pub mod data;
#[allow(clippy::missing_errors_doc)]
pub mod groups;

use axum::Router;
use axum::routing::{get, post};

use groupboard_app::ports::SnapshotRepository;

use crate::state::AppState;

/// Build the `/api` sub-router.
pub fn routes<R>() -> Router<AppState<R>>
where
    R: SnapshotRepository + Send + Sync + 'static,
{
    Router::new()
        .route("/data", post(data::receive::<R>))
        .route("/dashboard", get(dashboard::latest::<R>))
        .route("/group/{group_id}", get(groups::history::<R>))
}
