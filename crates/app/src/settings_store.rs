//! Settings store — the single guarded home of all mutable configuration.
//!
//! Both execution contexts (the automation loop and per-request HTTP
//! handlers) go through this store. One lock covers the controller
//! settings, the actuator table, and the static sensor table, so every
//! `get` sees a consistent snapshot and every `merge` is atomic.

use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde_json::Value;

use sprout_domain::error::SproutError;
use sprout_domain::settings::{ActuatorConfig, ControllerSettings, SensorSpec};

/// Result of a controller merge: the snapshot before and after, used to
/// detect the enabled true → false transition that triggers the cascade.
#[derive(Debug, Clone)]
pub struct ControllerMerge {
    pub previous: ControllerSettings,
    pub current: ControllerSettings,
}

struct Inner {
    controller: ControllerSettings,
    actuators: BTreeMap<String, ActuatorConfig>,
    sensors: BTreeMap<String, SensorSpec>,
}

/// Guarded settings shared between the loop and the HTTP handlers.
///
/// Created once at startup from configuration; entries are never added or
/// removed afterwards, only their values change.
pub struct SettingsStore {
    inner: RwLock<Inner>,
}

impl SettingsStore {
    /// Build the store from loaded configuration.
    #[must_use]
    pub fn new(
        controller: ControllerSettings,
        actuators: BTreeMap<String, ActuatorConfig>,
        sensors: BTreeMap<String, SensorSpec>,
    ) -> Self {
        Self {
            inner: RwLock::new(Inner {
                controller,
                actuators,
                sensors,
            }),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, Inner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Inner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Snapshot of the controller settings.
    #[must_use]
    pub fn controller(&self) -> ControllerSettings {
        self.read().controller.clone()
    }

    /// Merge a partial document into the controller settings.
    ///
    /// # Errors
    ///
    /// Returns [`SproutError::InvalidDocument`] when the patch does not
    /// type-check; the stored settings are left untouched in that case.
    pub fn merge_controller(&self, patch: &Value) -> Result<ControllerMerge, SproutError> {
        let mut inner = self.write();
        let previous = inner.controller.clone();
        inner.controller.apply(patch)?;
        Ok(ControllerMerge {
            previous,
            current: inner.controller.clone(),
        })
    }

    /// Snapshot of one actuator's configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SproutError::NotFound`] for unknown names.
    pub fn actuator(&self, name: &str) -> Result<ActuatorConfig, SproutError> {
        self.read()
            .actuators
            .get(name)
            .cloned()
            .ok_or_else(|| SproutError::not_found("actuator", name))
    }

    /// Snapshot of the whole actuator table.
    #[must_use]
    pub fn actuators(&self) -> Vec<(String, ActuatorConfig)> {
        self.read()
            .actuators
            .iter()
            .map(|(name, config)| (name.clone(), config.clone()))
            .collect()
    }

    /// Merge a partial document into one actuator's configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SproutError::NotFound`] for unknown names or
    /// [`SproutError::InvalidDocument`] when the patch does not type-check;
    /// the stored configuration is left untouched on failure.
    pub fn merge_actuator(&self, name: &str, patch: &Value) -> Result<ActuatorConfig, SproutError> {
        let mut inner = self.write();
        let config = inner
            .actuators
            .get_mut(name)
            .ok_or_else(|| SproutError::not_found("actuator", name))?;
        config.apply(patch)?;
        Ok(config.clone())
    }

    /// Record the state last commanded for an actuator (loop/cascade path).
    ///
    /// # Errors
    ///
    /// Returns [`SproutError::NotFound`] for unknown names.
    pub fn record_command(&self, name: &str, on: bool) -> Result<(), SproutError> {
        let mut inner = self.write();
        let config = inner
            .actuators
            .get_mut(name)
            .ok_or_else(|| SproutError::not_found("actuator", name))?;
        config.enabled = on;
        Ok(())
    }

    /// Configured units for a sensor.
    ///
    /// # Errors
    ///
    /// Returns [`SproutError::NotFound`] for unknown names.
    pub fn sensor_units(&self, name: &str) -> Result<String, SproutError> {
        self.read()
            .sensors
            .get(name)
            .map(|spec| spec.units.clone())
            .ok_or_else(|| SproutError::not_found("sensor", name))
    }

    /// Names of all configured sensors.
    #[must_use]
    pub fn sensor_names(&self) -> Vec<String> {
        self.read().sensors.keys().cloned().collect()
    }
}
