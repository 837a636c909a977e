//! Handlers for the controller singleton resource.

use axum::body::Bytes;
use axum::extract::State;
use axum::response::Response;

use sprout_app::ports::{ActuatorGateway, CameraCapture, SensorReader};

use crate::api::parse_patch;
use crate::error::ApiError;
use crate::reply;
use crate::state::AppState;

/// `GET /controller` — current controller settings.
pub async fn get<S, A, C>(State(state): State<AppState<S, A, C>>) -> Result<Response, ApiError>
where
    S: SensorReader + 'static,
    A: ActuatorGateway + 'static,
    C: CameraCapture + 'static,
{
    let settings = state.controller_service.get();
    Ok(reply::resource("controller", serde_json::to_value(settings)?))
}

/// `PATCH /controller` — partial settings update, always allowed.
///
/// Beyond the merge this rewrites the controller indicator channel and,
/// on an enabled true → false transition, shuts every actuator off.
pub async fn set<S, A, C>(
    State(state): State<AppState<S, A, C>>,
    body: Bytes,
) -> Result<Response, ApiError>
where
    S: SensorReader + 'static,
    A: ActuatorGateway + 'static,
    C: CameraCapture + 'static,
{
    let patch = parse_patch(&body)?;
    let settings = state.controller_service.set(&patch).await?;
    Ok(reply::resource("controller", serde_json::to_value(settings)?))
}
