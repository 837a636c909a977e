//! Handler for the still-image resource.

use axum::extract::State;
use axum::response::Response;

use sprout_app::ports::{ActuatorGateway, CameraCapture, SensorReader};

use crate::error::ApiError;
use crate::reply;
use crate::state::AppState;

/// `GET /image` — capture and return a JPEG still.
pub async fn get<S, A, C>(State(state): State<AppState<S, A, C>>) -> Result<Response, ApiError>
where
    S: SensorReader + 'static,
    A: ActuatorGateway + 'static,
    C: CameraCapture + 'static,
{
    let bytes = state.camera.capture().await?;
    Ok(reply::jpeg(bytes))
}
