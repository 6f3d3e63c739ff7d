//! Time and timestamp helpers.
//!
//! Devices report time as fractional unix seconds; the rest of the system
//! works with [`Timestamp`].

use chrono::{DateTime, Utc};

/// UTC timestamp used for receipt times and display.
pub type Timestamp = DateTime<Utc>;

/// Seconds since the unix epoch, possibly fractional, as sent by devices.
pub type UnixSeconds = f64;

/// Return the current UTC time.
#[must_use]
pub fn now() -> Timestamp {
    Utc::now()
}

/// Convert a timestamp to fractional unix seconds (millisecond precision).
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn to_unix_seconds(ts: Timestamp) -> UnixSeconds {
    ts.timestamp_millis() as f64 / 1000.0
}

/// Convert fractional unix seconds to a timestamp.
///
/// Returns `None` for NaN, infinities, and values outside chrono's range.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn from_unix_seconds(secs: UnixSeconds) -> Option<Timestamp> {
    if !secs.is_finite() {
        return None;
    }
    DateTime::from_timestamp_millis((secs * 1000.0).round() as i64)
}

/// Human-readable wall-clock time of day (`HH:MM:SS`, UTC).
#[must_use]
pub fn format_clock(ts: Timestamp) -> String {
    ts.format("%H:%M:%S").to_string()
}
