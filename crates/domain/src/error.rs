//! Common error types used across the workspace.
//!
//! Each failure the system can surface maps to exactly one variant here.
//! Adapters construct variants with a human-readable reason; the HTTP
//! adapter owns the mapping to status codes.

/// Workspace-wide error type.
#[derive(Debug, thiserror::Error)]
pub enum SproutError {
    /// A sensor's published value is missing, unreadable, or unparseable.
    ///
    /// Recoverable: the automation loop skips the sensor for the cycle,
    /// the API surfaces it as an internal error.
    #[error("sensor '{name}' unavailable: {reason}")]
    SensorUnavailable { name: String, reason: String },

    /// The external actuator command failed or produced unusable output.
    #[error("actuator '{channel}' failed: {reason}")]
    ActuatorIo { channel: String, reason: String },

    /// A request named a resource that is not configured.
    #[error("{kind} '{name}' not found")]
    NotFound { kind: &'static str, name: String },

    /// Manual actuator writes are rejected while automation is active.
    #[error("Cannot set actuators while the controller is enabled.")]
    ControllerInterlock,

    /// The external still-capture command failed.
    #[error("image capture failed: {0}")]
    CaptureFailed(String),

    /// A settings document could not be parsed or re-typed after a merge.
    #[error("invalid settings document: {0}")]
    InvalidDocument(String),
}

impl SproutError {
    /// Build a [`SproutError::SensorUnavailable`] for `name`.
    pub fn sensor_unavailable(name: impl Into<String>, reason: impl ToString) -> Self {
        Self::SensorUnavailable {
            name: name.into(),
            reason: reason.to_string(),
        }
    }

    /// Build a [`SproutError::ActuatorIo`] for `channel`.
    pub fn actuator_io(channel: impl Into<String>, reason: impl ToString) -> Self {
        Self::ActuatorIo {
            channel: channel.into(),
            reason: reason.to_string(),
        }
    }

    /// Build a [`SproutError::NotFound`] for a resource of `kind`.
    pub fn not_found(kind: &'static str, name: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            name: name.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_render_interlock_message_verbatim() {
        assert_eq!(
            SproutError::ControllerInterlock.to_string(),
            "Cannot set actuators while the controller is enabled."
        );
    }

    #[test]
    fn should_include_sensor_name_and_reason() {
        let err = SproutError::sensor_unavailable("moisture", "no such file");
        assert_eq!(
            err.to_string(),
            "sensor 'moisture' unavailable: no such file"
        );
    }

    #[test]
    fn should_include_resource_kind_in_not_found() {
        let err = SproutError::not_found("actuator", "doesnotexist");
        assert_eq!(err.to_string(), "actuator 'doesnotexist' not found");
    }
}
