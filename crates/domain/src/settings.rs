//! Settings documents — the mutable state owned by the settings store.
//!
//! All updates go through [`apply_patch`], which round-trips the typed
//! struct through a JSON document and runs the known-keys merge on it. The
//! key set of a settings object therefore never changes after creation;
//! only values do.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::SproutError;
use crate::merge::update_params;

/// Merge a partial document into `target`, known keys only.
///
/// # Errors
///
/// Returns [`SproutError::InvalidDocument`] when the merged document no
/// longer satisfies the target type (e.g. a boolean field patched with a
/// string).
pub fn apply_patch<T>(target: &mut T, patch: &Value) -> Result<(), SproutError>
where
    T: Serialize + DeserializeOwned,
{
    let mut doc =
        serde_json::to_value(&*target).map_err(|err| SproutError::InvalidDocument(err.to_string()))?;
    update_params(&mut doc, patch);
    *target =
        serde_json::from_value(doc).map_err(|err| SproutError::InvalidDocument(err.to_string()))?;
    Ok(())
}

/// Static description of a configured sensor.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SensorSpec {
    /// Display units attached to every reading (e.g. `"C"`, `"%"`).
    pub units: String,
}

/// The controller's own settings. Singleton, merged via `PATCH /controller`.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ControllerSettings {
    /// Whether the automation loop evaluates actuators.
    pub enabled: bool,
    /// Poll period in seconds, re-read by the loop every cycle.
    pub interval: u64,
}

impl ControllerSettings {
    /// Merge a partial update into these settings.
    ///
    /// # Errors
    ///
    /// See [`apply_patch`].
    pub fn apply(&mut self, patch: &Value) -> Result<(), SproutError> {
        apply_patch(self, patch)
    }
}

/// Per-actuator configuration and last commanded state.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ActuatorConfig {
    /// Hardware channel handed to the output command. Opaque to the core.
    pub channel: String,
    /// Name of the sensor this actuator reacts to. Actuators without a
    /// binding (indicator channels) are never evaluated by the loop.
    pub sensor: Option<String>,
    /// Hysteresis threshold, in the bound sensor's units.
    pub threshold: f64,
    /// Deadband half-width around the threshold.
    pub deviation: f64,
    /// Last commanded state. Live hardware state is always re-read through
    /// the gateway; this flag only records what was last written.
    pub enabled: bool,
}

impl ActuatorConfig {
    /// Merge a partial update into this configuration.
    ///
    /// # Errors
    ///
    /// See [`apply_patch`].
    pub fn apply(&mut self, patch: &Value) -> Result<(), SproutError> {
        apply_patch(self, patch)
    }
}
