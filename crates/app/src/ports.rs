//! Port definitions — traits that adapters implement.
//!
//! Ports are the boundaries between the application core and the outside
//! world. They are defined here so that both the use-case layer and the
//! adapter layer can depend on them without creating circular dependencies.

use std::future::Future;

use sprout_domain::error::SproutError;
use sprout_domain::reading::RawSample;

/// Access to the per-sensor published values.
///
/// Implementations read the value fresh on every call; nothing is cached.
pub trait SensorReader: Send + Sync {
    /// Fetch the latest sample for `name`.
    ///
    /// Fails with [`SproutError::SensorUnavailable`] when the published
    /// location is absent, unreadable, or does not parse as a float. The
    /// caller treats this as "no reading this cycle", never as fatal.
    fn read(&self, name: &str) -> impl Future<Output = Result<RawSample, SproutError>> + Send;
}

/// Access to actuator hardware through the external output command.
///
/// This is the only way actuator state changes. Implementations hold no
/// cached state: every read re-queries hardware, so the control API and the
/// automation loop never observe stale actuator state from each other.
pub trait ActuatorGateway: Send + Sync {
    /// Read the current boolean state of `channel`.
    fn read_state(&self, channel: &str) -> impl Future<Output = Result<bool, SproutError>> + Send;

    /// Command `channel` on or off.
    fn write_state(
        &self,
        channel: &str,
        on: bool,
    ) -> impl Future<Output = Result<(), SproutError>> + Send;
}

// The same gateway instance backs the actuator service, the controller
// service, and the automation loop.
impl<T: ActuatorGateway> ActuatorGateway for std::sync::Arc<T> {
    fn read_state(&self, channel: &str) -> impl Future<Output = Result<bool, SproutError>> + Send {
        self.as_ref().read_state(channel)
    }

    fn write_state(
        &self,
        channel: &str,
        on: bool,
    ) -> impl Future<Output = Result<(), SproutError>> + Send {
        self.as_ref().write_state(channel, on)
    }
}

/// Still-image capture.
pub trait CameraCapture: Send + Sync {
    /// Capture a JPEG image and return the raw bytes.
    fn capture(&self) -> impl Future<Output = Result<Vec<u8>, SproutError>> + Send;
}
