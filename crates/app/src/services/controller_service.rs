//! Controller service — merges controller settings and drives the
//! indicator and shutdown-cascade side effects.

use std::sync::Arc;

use serde_json::Value;

use sprout_domain::error::SproutError;
use sprout_domain::settings::ControllerSettings;

use crate::indicators::IndicatorChannels;
use crate::ports::ActuatorGateway;
use crate::settings_store::SettingsStore;

/// Application service for the controller resource.
pub struct ControllerService<A> {
    store: Arc<SettingsStore>,
    gateway: A,
    indicators: IndicatorChannels,
}

impl<A: ActuatorGateway> ControllerService<A> {
    /// Create a new service backed by the given gateway.
    pub fn new(store: Arc<SettingsStore>, gateway: A, indicators: IndicatorChannels) -> Self {
        Self {
            store,
            gateway,
            indicators,
        }
    }

    /// Snapshot of the controller settings.
    #[must_use]
    pub fn get(&self) -> ControllerSettings {
        self.store.controller()
    }

    /// Merge a partial update into the controller settings.
    ///
    /// Side effects beyond the merge: the controller indicator channel is
    /// rewritten to the post-merge enabled state, and a true → false
    /// transition commands every actuator OFF exactly once. Cascade
    /// failures on individual channels are logged and do not abort the
    /// cascade or the request.
    ///
    /// # Errors
    ///
    /// Returns [`SproutError::InvalidDocument`] when the patch does not
    /// type-check, or [`SproutError::ActuatorIo`] when the indicator write
    /// fails (the merge itself has already been committed then).
    pub async fn set(&self, patch: &Value) -> Result<ControllerSettings, SproutError> {
        let merge = self.store.merge_controller(patch)?;

        self.gateway
            .write_state(&self.indicators.controller, merge.current.enabled)
            .await?;

        if merge.previous.enabled && !merge.current.enabled {
            tracing::info!("controller disabled, shutting all actuators off");
            self.shut_down_actuators().await;
        }

        Ok(merge.current)
    }

    async fn shut_down_actuators(&self) {
        for (name, config) in self.store.actuators() {
            let result = async {
                self.gateway.write_state(&config.channel, false).await?;
                self.store.record_command(&name, false)
            }
            .await;
            if let Err(err) = result {
                tracing::warn!(actuator = %name, error = %err, "shutdown cascade write failed");
            }
        }
    }
}
