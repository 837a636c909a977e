//! Shared application state for axum handlers.

use std::sync::Arc;

use sprout_app::ports::{ActuatorGateway, CameraCapture, SensorReader};
use sprout_app::services::actuator_service::ActuatorService;
use sprout_app::services::controller_service::ControllerService;
use sprout_app::services::sensor_service::SensorService;

/// Application state shared across all axum handlers.
///
/// Generic over the sensor reader, actuator gateway, and camera to avoid
/// dynamic dispatch. `Clone` is implemented manually so the underlying
/// types themselves do not need to be `Clone` — only the `Arc` wrappers
/// are cloned.
pub struct AppState<S, A, C> {
    /// Sensor read use-cases.
    pub sensor_service: Arc<SensorService<S>>,
    /// Actuator status and manual-override use-cases.
    pub actuator_service: Arc<ActuatorService<A>>,
    /// Controller settings use-cases (indicator + cascade side effects).
    pub controller_service: Arc<ControllerService<A>>,
    /// Still-image capture.
    pub camera: Arc<C>,
}

impl<S, A, C> Clone for AppState<S, A, C> {
    fn clone(&self) -> Self {
        Self {
            sensor_service: Arc::clone(&self.sensor_service),
            actuator_service: Arc::clone(&self.actuator_service),
            controller_service: Arc::clone(&self.controller_service),
            camera: Arc::clone(&self.camera),
        }
    }
}

impl<S, A, C> AppState<S, A, C>
where
    S: SensorReader + Send + Sync + 'static,
    A: ActuatorGateway + Send + Sync + 'static,
    C: CameraCapture + Send + Sync + 'static,
{
    /// Create a new application state from service instances.
    pub fn new(
        sensor_service: SensorService<S>,
        actuator_service: ActuatorService<A>,
        controller_service: ControllerService<A>,
        camera: C,
    ) -> Self {
        Self {
            sensor_service: Arc::new(sensor_service),
            actuator_service: Arc::new(actuator_service),
            controller_service: Arc::new(controller_service),
            camera: Arc::new(camera),
        }
    }
}
