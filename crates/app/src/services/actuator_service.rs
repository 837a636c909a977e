//! Actuator service — live status reads and interlocked manual writes.

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use sprout_domain::error::SproutError;
use sprout_domain::settings::ActuatorConfig;

use crate::ports::ActuatorGateway;
use crate::settings_store::SettingsStore;

/// An actuator as exposed through the API: live hardware state first,
/// followed by the stored configuration.
#[derive(Debug, Clone, Serialize)]
pub struct ActuatorStatus {
    /// Hardware state re-read through the gateway for this response.
    pub enabled: bool,
    pub channel: String,
    pub sensor: Option<String>,
    pub threshold: f64,
    pub deviation: f64,
}

/// Application service for actuator reads and manual overrides.
pub struct ActuatorService<A> {
    store: Arc<SettingsStore>,
    gateway: A,
}

impl<A: ActuatorGateway> ActuatorService<A> {
    /// Create a new service backed by the given gateway.
    pub fn new(store: Arc<SettingsStore>, gateway: A) -> Self {
        Self { store, gateway }
    }

    async fn status(&self, config: ActuatorConfig) -> Result<ActuatorStatus, SproutError> {
        let enabled = self.gateway.read_state(&config.channel).await?;
        Ok(ActuatorStatus {
            enabled,
            channel: config.channel,
            sensor: config.sensor,
            threshold: config.threshold,
            deviation: config.deviation,
        })
    }

    /// Current status of one actuator.
    ///
    /// # Errors
    ///
    /// Returns [`SproutError::NotFound`] for unknown names and
    /// [`SproutError::ActuatorIo`] when the hardware read fails.
    pub async fn get(&self, name: &str) -> Result<ActuatorStatus, SproutError> {
        let config = self.store.actuator(name)?;
        self.status(config).await
    }

    /// Current status of every configured actuator.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`get`](Self::get); fails whole on the first
    /// hardware error.
    pub async fn list(&self) -> Result<Vec<(String, ActuatorStatus)>, SproutError> {
        let mut statuses = Vec::new();
        for (name, config) in self.store.actuators() {
            let status = self.status(config).await?;
            statuses.push((name, status));
        }
        Ok(statuses)
    }

    /// Apply a manual partial update, honoring the controller interlock.
    ///
    /// The hardware write is only issued when the patch touches `enabled`;
    /// threshold or binding changes are settings-only.
    ///
    /// # Errors
    ///
    /// Returns [`SproutError::ControllerInterlock`] while the controller is
    /// enabled — automation exclusively drives actuators then — plus the
    /// failure modes of the merge and the hardware write.
    pub async fn set_manual(&self, name: &str, patch: &Value) -> Result<ActuatorStatus, SproutError> {
        if self.store.controller().enabled {
            return Err(SproutError::ControllerInterlock);
        }
        let merged = self.store.merge_actuator(name, patch)?;
        if patch.get("enabled").is_some() {
            self.gateway.write_state(&merged.channel, merged.enabled).await?;
        }
        self.status(merged).await
    }
}
