//! Group snapshots — one reported state of a group at a point in time.

mod sensor_value;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

pub use sensor_value::{SensorValue, format_value};

use crate::error::{GroupBoardError, ValidationError};
use crate::time::UnixSeconds;

/// Sensor readings keyed by sensor name, in the order the device sent them.
pub type SensorData = IndexMap<String, SensorValue>;

/// One reported state of a group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupSnapshot {
    pub group_id: String,
    /// Device-side report time in unix seconds.
    pub timestamp: UnixSeconds,
    pub sensor_data: SensorData,
    /// Server-side receipt time, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub received_at: Option<String>,
}

impl GroupSnapshot {
    /// Create a builder for constructing a [`GroupSnapshot`].
    #[must_use]
    pub fn builder() -> GroupSnapshotBuilder {
        GroupSnapshotBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`GroupBoardError::Validation`] when `group_id` is empty or
    /// `timestamp` is not finite.
    pub fn validate(&self) -> Result<(), GroupBoardError> {
        if self.group_id.is_empty() {
            return Err(ValidationError::EmptyGroupId.into());
        }
        if !self.timestamp.is_finite() {
            return Err(ValidationError::NonFiniteTimestamp.into());
        }
        Ok(())
    }

    /// Look up a reading by sensor name.
    #[must_use]
    pub fn get_sensor(&self, key: &str) -> Option<&SensorValue> {
        self.sensor_data.get(key)
    }
}

/// Step-by-step builder for [`GroupSnapshot`].
#[derive(Debug, Default)]
pub struct GroupSnapshotBuilder {
    group_id: Option<String>,
    timestamp: Option<UnixSeconds>,
    sensor_data: SensorData,
    received_at: Option<String>,
}

impl GroupSnapshotBuilder {
    #[must_use]
    pub fn group_id(mut self, group_id: impl Into<String>) -> Self {
        self.group_id = Some(group_id.into());
        self
    }

    #[must_use]
    pub fn timestamp(mut self, timestamp: UnixSeconds) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    #[must_use]
    pub fn sensor(mut self, key: impl Into<String>, value: impl Into<SensorValue>) -> Self {
        self.sensor_data.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn sensor_data(mut self, sensor_data: SensorData) -> Self {
        self.sensor_data = sensor_data;
        self
    }

    #[must_use]
    pub fn received_at(mut self, received_at: impl Into<String>) -> Self {
        self.received_at = Some(received_at.into());
        self
    }

    /// Consume the builder, validate, and return a [`GroupSnapshot`].
    ///
    /// # Errors
    ///
    /// Returns [`GroupBoardError::Validation`] if `group_id` is missing or
    /// empty, or the timestamp is not finite.
    pub fn build(self) -> Result<GroupSnapshot, GroupBoardError> {
        let snapshot = GroupSnapshot {
            group_id: self.group_id.unwrap_or_default(),
            timestamp: self.timestamp.unwrap_or_default(),
            sensor_data: self.sensor_data,
            received_at: self.received_at,
        };
        snapshot.validate()?;
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_build_snapshot_with_all_fields() {
        let snapshot = GroupSnapshot::builder()
            .group_id("group_1")
            .timestamp(1_000.0)
            .sensor("temperature", 21.5)
            .sensor("status", "ok")
            .received_at("2026-10-18 10:00:00")
            .build()
            .unwrap();

        assert_eq!(snapshot.group_id, "group_1");
        assert!((snapshot.timestamp - 1_000.0).abs() < f64::EPSILON);
        assert_eq!(
            snapshot.get_sensor("temperature"),
            Some(&SensorValue::Number(21.5))
        );
        assert_eq!(snapshot.received_at.as_deref(), Some("2026-10-18 10:00:00"));
    }

    #[test]
    fn should_reject_missing_group_id() {
        let result = GroupSnapshot::builder().timestamp(1.0).build();
        assert!(matches!(
            result,
            Err(GroupBoardError::Validation(ValidationError::EmptyGroupId))
        ));
    }

    #[test]
    fn should_reject_non_finite_timestamp() {
        let result = GroupSnapshot::builder()
            .group_id("group_1")
            .timestamp(f64::NAN)
            .build();
        assert!(matches!(
            result,
            Err(GroupBoardError::Validation(
                ValidationError::NonFiniteTimestamp
            ))
        ));
    }

    #[test]
    fn should_preserve_sensor_order_from_json() {
        let json = r#"{
            "group_id": "group_2",
            "timestamp": 1700000000,
            "sensor_data": {"zeta": 1, "alpha": "on", "mid": 2.5}
        }"#;
        let snapshot: GroupSnapshot = serde_json::from_str(json).unwrap();
        let keys: Vec<&str> = snapshot.sensor_data.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
        assert!(snapshot.received_at.is_none());
    }

    #[test]
    fn should_omit_missing_received_at_when_serializing() {
        let snapshot = GroupSnapshot::builder()
            .group_id("group_1")
            .timestamp(5.0)
            .build()
            .unwrap();
        let json = serde_json::to_value(&snapshot).unwrap();
        assert!(json.get("received_at").is_none());
    }
}
