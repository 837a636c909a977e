//! Sensor reading documents.

use serde::Serialize;

/// A value freshly sampled from a sensor's published location.
///
/// Produced by the hardware reader before units are known; the sensor
/// service combines it with the configured [`SensorSpec`] units.
///
/// [`SensorSpec`]: crate::settings::SensorSpec
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawSample {
    /// Parsed numeric value.
    pub value: f64,
    /// Publication time, epoch seconds (the file's modification time).
    pub timestamp: i64,
}

/// A complete sensor reading as exposed through the API.
///
/// Ephemeral: built per query, never cached.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SensorReading {
    pub units: String,
    pub timestamp: i64,
    pub value: f64,
}

impl SensorReading {
    /// Attach configured units to a raw sample.
    #[must_use]
    pub fn from_sample(sample: RawSample, units: impl Into<String>) -> Self {
        Self {
            units: units.into(),
            timestamp: sample.timestamp,
            value: sample.value,
        }
    }
}
