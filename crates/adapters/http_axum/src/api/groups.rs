//! `GET /api/group/{group_id}` — recent history of one group.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use groupboard_app::ports::SnapshotRepository;
use groupboard_domain::dashboard::SUCCESS_STATUS;
use groupboard_domain::snapshot::GroupSnapshot;

use crate::error::ApiError;
use crate::state::AppState;

/// Optional query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<usize>,
}

/// Body of the history endpoint.
#[derive(Debug, Serialize)]
pub struct HistoryBody {
    pub status: &'static str,
    pub group_id: String,
    pub data: Vec<GroupSnapshot>,
}

/// Possible responses from the history endpoint.
pub enum HistoryResponse {
    Ok(Json<HistoryBody>),
}

impl IntoResponse for HistoryResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// `GET /api/group/{group_id}`
pub async fn history<R>(
    State(state): State<AppState<R>>,
    Path(group_id): Path<String>,
    Query(query): Query<HistoryQuery>,
) -> Result<HistoryResponse, ApiError>
where
    R: SnapshotRepository + Send + Sync + 'static,
{
    let data = state
        .snapshot_service
        .group_history(&group_id, query.limit)
        .await?;
    Ok(HistoryResponse::Ok(Json(HistoryBody {
        status: SUCCESS_STATUS,
        group_id,
        data,
    })))
}
