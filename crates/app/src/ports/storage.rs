//! Storage port — persistence for received snapshots.

use std::future::Future;

use groupboard_domain::error::GroupBoardError;
use groupboard_domain::snapshot::GroupSnapshot;

/// Repository for persisting and querying [`GroupSnapshot`]s.
pub trait SnapshotRepository {
    /// Persist a newly received snapshot.
    fn record(
        &self,
        snapshot: GroupSnapshot,
    ) -> impl Future<Output = Result<GroupSnapshot, GroupBoardError>> + Send;

    /// The snapshot with the highest timestamp of every group, ordered by
    /// `group_id`.
    fn latest_per_group(
        &self,
    ) -> impl Future<Output = Result<Vec<GroupSnapshot>, GroupBoardError>> + Send;

    /// Snapshots of one group, newest-first, at most `limit` of them.
    fn find_by_group(
        &self,
        group_id: &str,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<GroupSnapshot>, GroupBoardError>> + Send;
}
