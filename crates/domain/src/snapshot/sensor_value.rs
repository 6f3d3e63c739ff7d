//! Typed sensor readings and their display format.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single sensor reading as reported by a device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SensorValue {
    Number(f64),
    Text(String),
    /// Anything else a device may send (booleans, nulls, nested objects).
    Other(serde_json::Value),
}

impl From<f64> for SensorValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for SensorValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for SensorValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Render a reading for display.
///
/// Numbers always carry exactly two decimals, text passes through
/// untouched, and other JSON values render as their JSON text.
#[must_use]
pub fn format_value(value: &SensorValue) -> String {
    value.to_string()
}

impl fmt::Display for SensorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n:.2}"),
            Self::Text(s) => f.write_str(s),
            Self::Other(v) => write!(f, "{v}"),
        }
    }
}
