//! Request handler modules, one per resource family.

pub mod actuators;
pub mod controller;
pub mod image;
pub mod sensors;

use axum::body::Bytes;
use serde_json::Value;

use crate::error::ApiError;

/// Parse a PATCH body as a partial settings document.
///
/// The body is taken as raw bytes rather than through an extractor so a
/// malformed document still produces the structured error envelope.
pub(crate) fn parse_patch(body: &Bytes) -> Result<Value, ApiError> {
    serde_json::from_slice(body).map_err(ApiError::from)
}
