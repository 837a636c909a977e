//! # sprout-adapter-fs-sensor
//!
//! Filesystem sensor reader. The hardware pollers (serial ADC, DHT) each
//! publish their latest reading as a plain numeric value in a well-known
//! file; the file's modification time doubles as the reading's timestamp.
//! This adapter implements the [`SensorReader`] port over that convention.

use std::path::PathBuf;

use sprout_app::ports::SensorReader;
use sprout_domain::error::SproutError;
use sprout_domain::reading::RawSample;
use sprout_domain::time::epoch_seconds;

/// Reads sensor values from `<data_dir>/<sensor-name>`.
#[derive(Debug, Clone)]
pub struct FsSensorReader {
    data_dir: PathBuf,
}

impl FsSensorReader {
    /// Create a reader over the given data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }
}

impl SensorReader for FsSensorReader {
    async fn read(&self, name: &str) -> Result<RawSample, SproutError> {
        let path = self.data_dir.join(name);

        let metadata = tokio::fs::metadata(&path)
            .await
            .map_err(|err| SproutError::sensor_unavailable(name, &err))?;
        let modified = metadata
            .modified()
            .map_err(|err| SproutError::sensor_unavailable(name, &err))?;

        let content = tokio::fs::read_to_string(&path)
            .await
            .map_err(|err| SproutError::sensor_unavailable(name, &err))?;
        let value = content.trim().parse::<f64>().map_err(|_| {
            SproutError::sensor_unavailable(
                name,
                format!("published value {:?} is not a number", content.trim()),
            )
        })?;

        Ok(RawSample {
            value,
            timestamp: epoch_seconds(modified),
        })
    }
}
