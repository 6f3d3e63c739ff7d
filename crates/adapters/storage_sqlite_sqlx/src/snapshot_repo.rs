//! `SQLite` implementation of [`SnapshotRepository`].

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use groupboard_app::ports::SnapshotRepository;
use groupboard_domain::error::GroupBoardError;
use groupboard_domain::snapshot::{GroupSnapshot, SensorData};
use groupboard_domain::time::now;

use crate::error::StorageError;

/// Wrapper for converting database rows into domain types without polluting
/// domain structs with database concerns.
struct Wrapper(GroupSnapshot);

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let group_id: String = row.try_get("group_id")?;
        let timestamp: f64 = row.try_get("timestamp")?;
        let sensor_json: String = row.try_get("sensor_data")?;
        let received_at: String = row.try_get("received_at")?;

        let sensor_data: SensorData = serde_json::from_str(&sensor_json)
            .map_err(|err| sqlx::Error::Decode(Box::new(err)))?;

        Ok(Self(GroupSnapshot {
            group_id,
            timestamp,
            sensor_data,
            received_at: Some(received_at),
        }))
    }
}

const INSERT: &str = r"
    INSERT INTO sensor_data (group_id, timestamp, sensor_data, received_at)
    VALUES (?, ?, ?, ?)
";

// Ties on timestamp resolve to the most recently inserted row.
const SELECT_LATEST_PER_GROUP: &str = r"
    SELECT sd.* FROM sensor_data sd
    WHERE sd.id = (
        SELECT latest.id FROM sensor_data latest
        WHERE latest.group_id = sd.group_id
        ORDER BY latest.timestamp DESC, latest.id DESC
        LIMIT 1
    )
    ORDER BY sd.group_id
";

const SELECT_BY_GROUP: &str = r"
    SELECT * FROM sensor_data
    WHERE group_id = ?
    ORDER BY timestamp DESC, id DESC
    LIMIT ?
";

/// `SQLite`-backed snapshot repository.
pub struct SqliteSnapshotRepository {
    pool: SqlitePool,
}

impl SqliteSnapshotRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl SnapshotRepository for SqliteSnapshotRepository {
    async fn record(&self, mut snapshot: GroupSnapshot) -> Result<GroupSnapshot, GroupBoardError> {
        let sensor_json =
            serde_json::to_string(&snapshot.sensor_data).map_err(StorageError::from)?;
        let received_at = snapshot
            .received_at
            .get_or_insert_with(|| now().to_rfc3339())
            .clone();

        sqlx::query(INSERT)
            .bind(&snapshot.group_id)
            .bind(snapshot.timestamp)
            .bind(&sensor_json)
            .bind(&received_at)
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(snapshot)
    }

    async fn latest_per_group(&self) -> Result<Vec<GroupSnapshot>, GroupBoardError> {
        let rows: Vec<Wrapper> = sqlx::query_as(SELECT_LATEST_PER_GROUP)
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(rows.into_iter().map(|w| w.0).collect())
    }

    async fn find_by_group(
        &self,
        group_id: &str,
        limit: usize,
    ) -> Result<Vec<GroupSnapshot>, GroupBoardError> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let rows: Vec<Wrapper> = sqlx::query_as(SELECT_BY_GROUP)
            .bind(group_id)
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(rows.into_iter().map(|w| w.0).collect())
    }
}
