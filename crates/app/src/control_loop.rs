//! Automation loop — the long-lived task that keeps the garden in range.
//!
//! One dedicated task, started at boot, that evaluates every bound
//! actuator against its sensor once per poll cycle and sleeps in between.
//! It cooperates with request handlers only through the guarded
//! [`SettingsStore`] and the actuator gateway, never by direct call.

use std::sync::Arc;
use std::time::Duration;

use sprout_domain::error::SproutError;
use sprout_domain::hysteresis::decide;
use sprout_domain::settings::ActuatorConfig;

use crate::indicators::IndicatorChannels;
use crate::ports::{ActuatorGateway, SensorReader};
use crate::settings_store::SettingsStore;

/// The background automation loop.
pub struct ControlLoop<S, A> {
    store: Arc<SettingsStore>,
    sensors: S,
    gateway: A,
    indicators: IndicatorChannels,
}

impl<S: SensorReader, A: ActuatorGateway> ControlLoop<S, A> {
    /// Create a loop over the shared store and hardware ports.
    pub fn new(
        store: Arc<SettingsStore>,
        sensors: S,
        gateway: A,
        indicators: IndicatorChannels,
    ) -> Self {
        Self {
            store,
            sensors,
            gateway,
            indicators,
        }
    }

    /// Run forever: announce, then evaluate-and-sleep.
    ///
    /// The poll interval is re-read from the store after every cycle, so a
    /// live `interval` change takes effect on the next sleep.
    pub async fn run(self) {
        self.announce().await;
        loop {
            self.tick().await;
            let interval = self.store.controller().interval;
            tokio::time::sleep(Duration::from_secs(interval)).await;
        }
    }

    /// Raise the indicator channels at startup.
    ///
    /// Failures are logged but not fatal: the rest of the loop still runs
    /// and the controller indicator is rewritten on every controller merge.
    async fn announce(&self) {
        let enabled = self.store.controller().enabled;
        for (channel, state) in [
            (self.indicators.system.as_str(), true),
            (self.indicators.controller.as_str(), enabled),
        ] {
            if let Err(err) = self.gateway.write_state(channel, state).await {
                tracing::warn!(channel, error = %err, "startup indicator write failed");
            }
        }
    }

    /// Evaluate one poll cycle.
    ///
    /// Does nothing while the controller is disabled. A failure on one
    /// actuator is logged and never aborts the cycle for the others.
    pub async fn tick(&self) {
        if !self.store.controller().enabled {
            return;
        }
        for (name, config) in self.store.actuators() {
            if let Err(err) = self.evaluate(&name, &config).await {
                tracing::warn!(actuator = %name, error = %err, "skipping actuator this cycle");
            }
        }
    }

    async fn evaluate(&self, name: &str, config: &ActuatorConfig) -> Result<(), SproutError> {
        let Some(sensor) = config.sensor.as_deref() else {
            return Ok(());
        };
        let sample = self.sensors.read(sensor).await?;
        let Some(on) = decide(sample.value, config.threshold, config.deviation) else {
            return Ok(());
        };
        self.gateway.write_state(&config.channel, on).await?;
        self.store.record_command(name, on)?;
        tracing::debug!(
            actuator = %name,
            sensor,
            value = sample.value,
            commanded = on,
            "actuator commanded"
        );
        Ok(())
    }
}
