//! Handlers for the read-only sensors resource family.

use axum::extract::{Path, State};
use axum::response::Response;

use sprout_app::ports::{ActuatorGateway, CameraCapture, SensorReader};

use crate::error::ApiError;
use crate::reply;
use crate::state::AppState;

/// `GET /sensors` — fresh readings for every configured sensor.
pub async fn list<S, A, C>(State(state): State<AppState<S, A, C>>) -> Result<Response, ApiError>
where
    S: SensorReader + 'static,
    A: ActuatorGateway + 'static,
    C: CameraCapture + 'static,
{
    let mut documents = Vec::new();
    for (name, reading) in state.sensor_service.list().await? {
        documents.push((name, serde_json::to_value(reading)?));
    }
    Ok(reply::resources(documents))
}

/// `GET /sensors/{name}` — one fresh reading.
pub async fn get<S, A, C>(
    State(state): State<AppState<S, A, C>>,
    Path(name): Path<String>,
) -> Result<Response, ApiError>
where
    S: SensorReader + 'static,
    A: ActuatorGateway + 'static,
    C: CameraCapture + 'static,
{
    let reading = state.sensor_service.get(&name).await?;
    Ok(reply::resource(&name, serde_json::to_value(reading)?))
}
