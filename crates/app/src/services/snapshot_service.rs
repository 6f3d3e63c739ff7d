//! Snapshot service — use-cases for receiving and querying group readings.

use groupboard_domain::error::{GroupBoardError, ValidationError};
use groupboard_domain::snapshot::{GroupSnapshot, SensorData};
use groupboard_domain::time::{UnixSeconds, now, to_unix_seconds};

use crate::ports::SnapshotRepository;

/// Number of history entries returned when no limit is given.
pub const DEFAULT_HISTORY_LIMIT: usize = 10;

/// Application service for ingesting and listing group snapshots.
pub struct SnapshotService<R> {
    repo: R,
    valid_groups: Vec<String>,
}

impl<R: SnapshotRepository> SnapshotService<R> {
    /// Create a new service that accepts readings from `valid_groups` only.
    pub fn new(repo: R, valid_groups: Vec<String>) -> Self {
        Self { repo, valid_groups }
    }

    /// The roster of accepted group identifiers.
    #[must_use]
    pub fn valid_groups(&self) -> &[String] {
        &self.valid_groups
    }

    /// Record a reading sent by a device.
    ///
    /// A missing `timestamp` defaults to the receipt time.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidGroup`] when `group_id` is not on the
    /// roster, another [`GroupBoardError::Validation`] if the snapshot is
    /// malformed, or a storage error from the repository.
    pub async fn ingest(
        &self,
        group_id: String,
        timestamp: Option<UnixSeconds>,
        sensor_data: SensorData,
    ) -> Result<GroupSnapshot, GroupBoardError> {
        if !self.valid_groups.iter().any(|valid| *valid == group_id) {
            return Err(ValidationError::InvalidGroup { group_id }.into());
        }

        let received_at = now();
        let snapshot = GroupSnapshot::builder()
            .group_id(group_id)
            .timestamp(timestamp.unwrap_or_else(|| to_unix_seconds(received_at)))
            .sensor_data(sensor_data)
            .received_at(received_at.to_rfc3339())
            .build()?;

        let saved = self.repo.record(snapshot).await?;
        tracing::info!(group_id = %saved.group_id, "sensor data saved");
        Ok(saved)
    }

    /// The latest snapshot of every group that ever reported, ordered by
    /// `group_id`.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn latest_per_group(&self) -> Result<Vec<GroupSnapshot>, GroupBoardError> {
        self.repo.latest_per_group().await
    }

    /// Recent snapshots of one group, newest-first.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn group_history(
        &self,
        group_id: &str,
        limit: Option<usize>,
    ) -> Result<Vec<GroupSnapshot>, GroupBoardError> {
        self.repo
            .find_by_group(group_id, limit.unwrap_or(DEFAULT_HISTORY_LIMIT))
            .await
    }
}
