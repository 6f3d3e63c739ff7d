//! HTTP error response mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use groupboard_domain::error::GroupBoardError;

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Maps [`GroupBoardError`] to an HTTP response with appropriate status code.
#[derive(Debug)]
pub struct ApiError(GroupBoardError);

impl From<GroupBoardError> for ApiError {
    fn from(err: GroupBoardError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            GroupBoardError::Validation(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            GroupBoardError::Storage(_)
            | GroupBoardError::Transport(_)
            | GroupBoardError::View(_) => {
                tracing::error!(error = %self.0, source = ?self.0, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
