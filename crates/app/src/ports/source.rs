//! Source port — where a poller gets its dashboard data from.

use std::future::Future;

use groupboard_domain::dashboard::DashboardResponse;
use groupboard_domain::error::GroupBoardError;

/// Fetches the current dashboard snapshot list.
pub trait DashboardSource {
    /// Fetch one dashboard response.
    ///
    /// Network and decode failures are reported as
    /// [`GroupBoardError::Transport`]. A decoded body whose status is not the
    /// success sentinel is *not* an error.
    fn fetch(&self) -> impl Future<Output = Result<DashboardResponse, GroupBoardError>> + Send;
}

impl<T: DashboardSource + Send + Sync> DashboardSource for std::sync::Arc<T> {
    fn fetch(&self) -> impl Future<Output = Result<DashboardResponse, GroupBoardError>> + Send {
        (**self).fetch()
    }
}
