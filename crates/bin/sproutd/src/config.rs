//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `sproutd.toml` in the working directory (overridable with
//! `SPROUT_CONFIG`). Every field outside the sensor/actuator tables has a
//! sensible default so the file is optional. Environment variables take
//! precedence over file values. Validation is fail-fast: a bad sensor
//! binding is rejected here, not at first use inside the loop.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

use sprout_app::indicators::IndicatorChannels;
use sprout_domain::settings::{ActuatorConfig, ControllerSettings, SensorSpec};

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Controller startup settings.
    pub controller: ControllerConfig,
    /// Paths to the hardware collaborators.
    pub hardware: HardwareConfig,
    /// Still-capture settings.
    pub camera: CameraConfig,
    /// Configured sensors, keyed by name.
    pub sensors: BTreeMap<String, SensorEntry>,
    /// Configured actuators, keyed by name.
    pub actuators: BTreeMap<String, ActuatorEntry>,
}

/// HTTP listener configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to (e.g. `0.0.0.0`).
    pub host: String,
    /// TCP port.
    pub port: u16,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

/// Controller settings applied at startup.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    /// Whether the automation loop starts enabled.
    pub enabled: bool,
    /// Poll period in seconds.
    pub interval: u64,
}

/// Locations of the external hardware collaborators.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct HardwareConfig {
    /// Directory where the pollers publish sensor values.
    pub data_dir: PathBuf,
    /// The output command owning the GPIO pins.
    pub output_command: PathBuf,
    /// Bound on a single output-command invocation, in seconds.
    pub command_timeout_secs: u64,
    /// Channel raised once at loop startup.
    pub system_indicator: String,
    /// Channel mirroring `controller.enabled`.
    pub controller_indicator: String,
}

/// Still-capture configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// The capture command (`raspistill` compatible).
    pub command: PathBuf,
    /// Capture width in pixels.
    pub width: u32,
    /// Capture height in pixels.
    pub height: u32,
}

/// One configured sensor.
#[derive(Debug, Deserialize)]
pub struct SensorEntry {
    /// Display units attached to every reading.
    pub units: String,
}

/// One configured actuator.
#[derive(Debug, Deserialize)]
pub struct ActuatorEntry {
    /// Hardware channel; defaults to the actuator's own name.
    pub channel: Option<String>,
    /// Bound sensor; actuators without one are never evaluated by the loop.
    pub sensor: Option<String>,
    /// Hysteresis threshold.
    pub threshold: f64,
    /// Deadband half-width.
    pub deviation: f64,
    /// Initial commanded state.
    #[serde(default)]
    pub enabled: bool,
}

impl Config {
    /// Load configuration from `sproutd.toml` (or `SPROUT_CONFIG`) then
    /// apply environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if
    /// validation fails.
    pub fn load() -> Result<Self, ConfigError> {
        let path =
            std::env::var("SPROUT_CONFIG").unwrap_or_else(|_| "sproutd.toml".to_string());
        let mut config = Self::from_file(&path)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("SPROUT_HOST") {
            self.server.host = val;
        }
        if let Ok(val) = std::env::var("SPROUT_PORT") {
            if let Ok(port) = val.parse() {
                self.server.port = port;
            }
        }
        if let Ok(val) = std::env::var("SPROUT_BIND") {
            if let Some((host, port)) = val.rsplit_once(':') {
                self.server.host = host.to_string();
                if let Ok(port) = port.parse() {
                    self.server.port = port;
                }
            }
        }
        if let Ok(val) = std::env::var("SPROUT_DATA_DIR") {
            self.hardware.data_dir = PathBuf::from(val);
        }
        if let Ok(val) = std::env::var("SPROUT_OUTPUT_COMMAND") {
            self.hardware.output_command = PathBuf::from(val);
        }
        if let Ok(val) = std::env::var("SPROUT_LOG") {
            self.logging.filter = val;
        }
        if let Ok(val) = std::env::var("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("port must be non-zero".to_string()));
        }
        if self.controller.interval == 0 {
            return Err(ConfigError::Validation(
                "controller interval must be at least one second".to_string(),
            ));
        }
        if self.hardware.command_timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "command timeout must be at least one second".to_string(),
            ));
        }
        for (name, actuator) in &self.actuators {
            if let Some(sensor) = &actuator.sensor {
                if !self.sensors.contains_key(sensor) {
                    return Err(ConfigError::Validation(format!(
                        "actuator '{name}' is bound to unknown sensor '{sensor}'"
                    )));
                }
            }
            if actuator.deviation < 0.0 {
                return Err(ConfigError::Validation(format!(
                    "actuator '{name}' has a negative deviation"
                )));
            }
        }
        Ok(())
    }

    /// Return the `host:port` bind address.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Bound applied to every output-command invocation.
    #[must_use]
    pub fn command_timeout(&self) -> Duration {
        Duration::from_secs(self.hardware.command_timeout_secs)
    }

    /// Indicator channel names for the loop and the controller service.
    #[must_use]
    pub fn indicators(&self) -> IndicatorChannels {
        IndicatorChannels {
            system: self.hardware.system_indicator.clone(),
            controller: self.hardware.controller_indicator.clone(),
        }
    }

    /// Controller settings seeded into the store.
    #[must_use]
    pub fn controller_settings(&self) -> ControllerSettings {
        ControllerSettings {
            enabled: self.controller.enabled,
            interval: self.controller.interval,
        }
    }

    /// Sensor table seeded into the store.
    #[must_use]
    pub fn sensor_specs(&self) -> BTreeMap<String, SensorSpec> {
        self.sensors
            .iter()
            .map(|(name, entry)| {
                (
                    name.clone(),
                    SensorSpec {
                        units: entry.units.clone(),
                    },
                )
            })
            .collect()
    }

    /// Actuator table seeded into the store.
    #[must_use]
    pub fn actuator_configs(&self) -> BTreeMap<String, ActuatorConfig> {
        self.actuators
            .iter()
            .map(|(name, entry)| {
                (
                    name.clone(),
                    ActuatorConfig {
                        channel: entry.channel.clone().unwrap_or_else(|| name.clone()),
                        sensor: entry.sensor.clone(),
                        threshold: entry.threshold,
                        deviation: entry.deviation,
                        enabled: entry.enabled,
                    },
                )
            })
            .collect()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "sproutd=info,sprout=info,tower_http=debug".to_string(),
        }
    }
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            interval: 60,
        }
    }
}

impl Default for HardwareConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("/var/sprout"),
            output_command: PathBuf::from("/usr/local/bin/sprout-output"),
            command_timeout_secs: 10,
            system_indicator: "system-indicator".to_string(),
            controller_indicator: "controller-indicator".to_string(),
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            command: PathBuf::from("raspistill"),
            width: 1280,
            height: 720,
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
