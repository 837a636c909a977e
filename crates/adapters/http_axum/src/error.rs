//! HTTP error response mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use sprout_domain::error::SproutError;

use crate::reply;

/// Maps failures to the `{"error": {status, message}}` envelope with the
/// appropriate status code.
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    /// The `405` answer for known paths hit with an unsupported method.
    #[must_use]
    pub fn method_not_allowed() -> Self {
        Self {
            status: StatusCode::METHOD_NOT_ALLOWED,
            message: "Method Not Allowed".to_string(),
        }
    }

    /// The `404` answer for paths outside the resource families.
    #[must_use]
    pub fn route_not_found() -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: "Not Found".to_string(),
        }
    }
}

impl From<SproutError> for ApiError {
    fn from(err: SproutError) -> Self {
        let status = match &err {
            SproutError::NotFound { .. } => StatusCode::NOT_FOUND,
            SproutError::ControllerInterlock => StatusCode::FORBIDDEN,
            SproutError::SensorUnavailable { .. }
            | SproutError::ActuatorIo { .. }
            | SproutError::CaptureFailed(_)
            | SproutError::InvalidDocument(_) => {
                tracing::error!(error = %err, "request failed on an adapter");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        SproutError::InvalidDocument(err.to_string()).into()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        reply::error(self.status, &self.message)
    }
}
