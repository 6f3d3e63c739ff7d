//! Dashboard response — the snapshot list served to pollers.

use serde::{Deserialize, Serialize};

use crate::snapshot::GroupSnapshot;

/// Status sentinel of a successful dashboard response.
pub const SUCCESS_STATUS: &str = "success";

/// Body of `GET /api/dashboard`.
///
/// `status` and `data` default when absent so that an error body such as
/// `{"error": "..."}` decodes as a non-success response rather than failing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardResponse {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub data: Vec<GroupSnapshot>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
}

impl DashboardResponse {
    /// Build a successful response around `data`.
    #[must_use]
    pub fn success(data: Vec<GroupSnapshot>, last_updated: impl Into<String>) -> Self {
        Self {
            status: SUCCESS_STATUS.to_string(),
            data,
            last_updated: Some(last_updated.into()),
        }
    }

    /// Whether the response carries the success sentinel.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status == SUCCESS_STATUS
    }
}
