//! `GET /api/dashboard` — latest snapshot of every group.

use axum::Json;
use axum::extract::State;
use axum::response::{IntoResponse, Response};

use groupboard_app::ports::SnapshotRepository;
use groupboard_domain::dashboard::DashboardResponse;
use groupboard_domain::time::now;

use crate::error::ApiError;
use crate::state::AppState;

/// Possible responses from the dashboard endpoint.
pub enum LatestResponse {
    Ok(Json<DashboardResponse>),
}

impl IntoResponse for LatestResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// `GET /api/dashboard`
pub async fn latest<R>(State(state): State<AppState<R>>) -> Result<LatestResponse, ApiError>
where
    R: SnapshotRepository + Send + Sync + 'static,
{
    let data = state.snapshot_service.latest_per_group().await?;
    Ok(LatestResponse::Ok(Json(DashboardResponse::success(
        data,
        now().to_rfc3339(),
    ))))
}
