//! Sensor service — read-only use-cases over the published sensor values.

use std::sync::Arc;

use sprout_domain::error::SproutError;
use sprout_domain::reading::SensorReading;

use crate::ports::SensorReader;
use crate::settings_store::SettingsStore;

/// Application service resolving sensor names to fresh readings.
pub struct SensorService<S> {
    store: Arc<SettingsStore>,
    reader: S,
}

impl<S: SensorReader> SensorService<S> {
    /// Create a new service backed by the given reader.
    pub fn new(store: Arc<SettingsStore>, reader: S) -> Self {
        Self { store, reader }
    }

    /// Read one sensor, attaching its configured units.
    ///
    /// # Errors
    ///
    /// Returns [`SproutError::NotFound`] for unconfigured names and
    /// [`SproutError::SensorUnavailable`] when the published value cannot
    /// be read.
    pub async fn get(&self, name: &str) -> Result<SensorReading, SproutError> {
        let units = self.store.sensor_units(name)?;
        let sample = self.reader.read(name).await?;
        Ok(SensorReading::from_sample(sample, units))
    }

    /// Read every configured sensor.
    ///
    /// The whole call fails on the first unavailable sensor — list
    /// responses are a single document, never partial.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`get`](Self::get).
    pub async fn list(&self) -> Result<Vec<(String, SensorReading)>, SproutError> {
        let mut readings = Vec::new();
        for name in self.store.sensor_names() {
            let reading = self.get(&name).await?;
            readings.push((name, reading));
        }
        Ok(readings)
    }
}
