//! `POST /api/data` — readings pushed by devices.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use groupboard_app::ports::SnapshotRepository;
use groupboard_domain::dashboard::SUCCESS_STATUS;
use groupboard_domain::error::{GroupBoardError, ValidationError};
use groupboard_domain::snapshot::SensorData;
use groupboard_domain::time::UnixSeconds;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body sent by a device.
///
/// Every field is optional at the wire level so that missing fields are
/// reported as a validation error rather than a decode failure.
#[derive(Debug, Deserialize)]
pub struct IngestRequest {
    pub group_id: Option<String>,
    pub timestamp: Option<UnixSeconds>,
    pub sensor_data: Option<SensorData>,
}

/// Acknowledgement returned to the device.
#[derive(Debug, Serialize)]
pub struct IngestBody {
    pub status: &'static str,
    pub message: String,
    pub received_at: String,
}

/// Possible responses from the ingest endpoint.
pub enum IngestResponse {
    Ok(Json<IngestBody>),
}

impl IntoResponse for IngestResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// `POST /api/data`
pub async fn receive<R>(
    State(state): State<AppState<R>>,
    body: Result<Json<IngestRequest>, JsonRejection>,
) -> Result<IngestResponse, ApiError>
where
    R: SnapshotRepository + Send + Sync + 'static,
{
    let Json(req) = body.map_err(|rejection| {
        tracing::debug!(%rejection, "rejected ingest body");
        GroupBoardError::from(ValidationError::MissingFields)
    })?;
    let (Some(group_id), Some(sensor_data)) = (req.group_id, req.sensor_data) else {
        return Err(GroupBoardError::from(ValidationError::MissingFields).into());
    };

    let saved = state
        .snapshot_service
        .ingest(group_id, req.timestamp, sensor_data)
        .await?;

    Ok(IngestResponse::Ok(Json(IngestBody {
        status: SUCCESS_STATUS,
        message: format!("Data received from {}", saved.group_id),
        received_at: saved.received_at.unwrap_or_default(),
    })))
}
