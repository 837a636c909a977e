//! Handlers for the actuators resource family.

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::response::Response;

use sprout_app::ports::{ActuatorGateway, CameraCapture, SensorReader};

use crate::api::parse_patch;
use crate::error::ApiError;
use crate::reply;
use crate::state::AppState;

/// `GET /actuators` — live status of every configured actuator.
pub async fn list<S, A, C>(State(state): State<AppState<S, A, C>>) -> Result<Response, ApiError>
where
    S: SensorReader + 'static,
    A: ActuatorGateway + 'static,
    C: CameraCapture + 'static,
{
    let mut documents = Vec::new();
    for (name, status) in state.actuator_service.list().await? {
        documents.push((name, serde_json::to_value(status)?));
    }
    Ok(reply::resources(documents))
}

/// `GET /actuators/{name}` — live status of one actuator.
pub async fn get<S, A, C>(
    State(state): State<AppState<S, A, C>>,
    Path(name): Path<String>,
) -> Result<Response, ApiError>
where
    S: SensorReader + 'static,
    A: ActuatorGateway + 'static,
    C: CameraCapture + 'static,
{
    let status = state.actuator_service.get(&name).await?;
    Ok(reply::resource(&name, serde_json::to_value(status)?))
}

/// `PATCH /actuators/{name}` — manual partial update.
///
/// Rejected with `403` while the controller is enabled (interlock).
pub async fn set<S, A, C>(
    State(state): State<AppState<S, A, C>>,
    Path(name): Path<String>,
    body: Bytes,
) -> Result<Response, ApiError>
where
    S: SensorReader + 'static,
    A: ActuatorGateway + 'static,
    C: CameraCapture + 'static,
{
    let patch = parse_patch(&body)?;
    let status = state.actuator_service.set_manual(&name, &patch).await?;
    Ok(reply::resource(&name, serde_json::to_value(status)?))
}
