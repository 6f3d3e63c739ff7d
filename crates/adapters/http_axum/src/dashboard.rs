//! Server-side rendered HTML dashboard (no JavaScript).
//!
//! The page is assembled from the same askama templates the poller uses and
//! reloads itself with `<meta http-equiv="refresh">`.

use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;

use groupboard_app::page::PageSlots;
use groupboard_app::ports::SnapshotRepository;
use groupboard_app::render::{render_groups, render_page};
use groupboard_domain::error::GroupBoardError;
use groupboard_domain::recency::WallClockRecency;
use groupboard_domain::time::{format_clock, now, to_unix_seconds};

use crate::state::AppState;

/// Build the dashboard sub-router for SSR HTML pages.
pub fn routes<R>() -> Router<AppState<R>>
where
    R: SnapshotRepository + Send + Sync + 'static,
{
    Router::new()
        .route("/", get(index::<R>))
        .route("/dashboard", get(index::<R>))
}

/// Dashboard document: the three page slots plus the reload cadence.
pub struct DashboardPage {
    slots: PageSlots,
    refresh_secs: u32,
}

impl IntoResponse for DashboardPage {
    fn into_response(self) -> Response {
        match render_page(&self.slots, Some(self.refresh_secs)) {
            Ok(html) => Html(html).into_response(),
            Err(err) => DashboardError(err).into_response(),
        }
    }
}

/// Error page returned when the snapshots cannot be loaded.
#[derive(Debug)]
pub struct DashboardError(GroupBoardError);

impl From<GroupBoardError> for DashboardError {
    fn from(err: GroupBoardError) -> Self {
        Self(err)
    }
}

impl IntoResponse for DashboardError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self.0, source = ?self.0, "dashboard rendering failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Html("<!DOCTYPE html>\n<html><body><h1>Internal server error</h1></body></html>\n"),
        )
            .into_response()
    }
}

/// `GET /` and `GET /dashboard` — status cards of every group.
///
/// # Errors
///
/// Returns [`DashboardError`] when the repository fails or the cards
/// cannot be rendered.
pub async fn index<R>(State(state): State<AppState<R>>) -> Result<DashboardPage, DashboardError>
where
    R: SnapshotRepository + Send + Sync + 'static,
{
    let groups = state.snapshot_service.latest_per_group().await?;
    let now = now();
    let slots = PageSlots {
        update_time: format_clock(now),
        total_groups: groups.len(),
        groups_html: render_groups(&groups, &mut WallClockRecency, to_unix_seconds(now))?,
    };
    Ok(DashboardPage {
        slots,
        refresh_secs: state.refresh_secs,
    })
}
