//! Recency policies — classify a group as online from its report timestamp.
//!
//! Two strategies exist and they disagree on purpose:
//!
//! | Strategy | Reference point | State |
//! |----------|-----------------|-------|
//! | [`WallClockRecency`] | the current time | none |
//! | [`ReferenceRecency`] | the newest timestamp seen so far, from any group | the running maximum |
//!
//! Exactly one is chosen per poller through [`RecencyStrategy`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::time::UnixSeconds;

/// A group is online when its timestamp is strictly closer than this to the
/// reference point.
pub const RECENCY_WINDOW_SECS: f64 = 120.0;

/// Decides whether a report timestamp counts as recent.
pub trait RecencyPolicy {
    /// Classify `timestamp` given the current wall-clock time `now`.
    ///
    /// Takes `&mut self` because some policies update their reference point
    /// on every call.
    fn is_recent(&mut self, timestamp: UnixSeconds, now: UnixSeconds) -> bool;
}

impl<T: RecencyPolicy + ?Sized> RecencyPolicy for Box<T> {
    fn is_recent(&mut self, timestamp: UnixSeconds, now: UnixSeconds) -> bool {
        (**self).is_recent(timestamp, now)
    }
}

fn within_window(a: UnixSeconds, b: UnixSeconds) -> bool {
    (a - b).abs() < RECENCY_WINDOW_SECS
}

/// Online iff the report is less than [`RECENCY_WINDOW_SECS`] away from now.
#[derive(Debug, Clone, Copy, Default)]
pub struct WallClockRecency;

impl RecencyPolicy for WallClockRecency {
    fn is_recent(&mut self, timestamp: UnixSeconds, now: UnixSeconds) -> bool {
        within_window(now, timestamp)
    }
}

/// Online iff the report is less than [`RECENCY_WINDOW_SECS`] away from the
/// newest timestamp observed so far.
///
/// The reference only moves forward and is never cleared, so "online" here
/// means recent relative to the freshest group, not to the current time.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReferenceRecency {
    latest: Option<UnixSeconds>,
}

impl ReferenceRecency {
    /// The newest timestamp observed so far, if any.
    #[must_use]
    pub fn reference(&self) -> Option<UnixSeconds> {
        self.latest
    }
}

impl RecencyPolicy for ReferenceRecency {
    fn is_recent(&mut self, timestamp: UnixSeconds, _now: UnixSeconds) -> bool {
        let reference = match self.latest {
            Some(latest) if latest >= timestamp => latest,
            _ => {
                self.latest = Some(timestamp);
                timestamp
            }
        };
        within_window(reference, timestamp)
    }
}

/// Which [`RecencyPolicy`] a poller uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecencyStrategy {
    /// [`WallClockRecency`].
    #[default]
    WallClock,
    /// [`ReferenceRecency`].
    Reference,
}

impl RecencyStrategy {
    /// Instantiate a fresh policy for this strategy.
    #[must_use]
    pub fn build(self) -> Box<dyn RecencyPolicy + Send> {
        match self {
            Self::WallClock => Box::new(WallClockRecency),
            Self::Reference => Box::new(ReferenceRecency::default()),
        }
    }
}

impl fmt::Display for RecencyStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WallClock => f.write_str("wall_clock"),
            Self::Reference => f.write_str("reference"),
        }
    }
}

/// Error returned when parsing an unknown strategy name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown recency strategy: {0}")]
pub struct UnknownStrategy(pub String);

impl FromStr for RecencyStrategy {
    type Err = UnknownStrategy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "wall_clock" => Ok(Self::WallClock),
            "reference" => Ok(Self::Reference),
            other => Err(UnknownStrategy(other.to_string())),
        }
    }
}
