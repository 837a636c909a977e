//! Response rendering — the single document envelope.
//!
//! Every JSON response is one object keyed by resource name, pretty-printed
//! and newline-terminated. Keeping the rendering in one place guarantees no
//! handler can leave a request half-answered or differently shaped.

use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde_json::{Map, Value};

fn envelope(status: StatusCode, document: Map<String, Value>) -> Response {
    match serde_json::to_string_pretty(&Value::Object(document)) {
        Ok(mut body) => {
            body.push('\n');
            (
                status,
                [(header::CONTENT_TYPE, "application/json")],
                body,
            )
                .into_response()
        }
        Err(err) => {
            tracing::error!(error = %err, "failed to render response document");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// A `200` envelope holding one resource document.
#[must_use]
pub fn resource(name: &str, document: Value) -> Response {
    resources(vec![(name.to_string(), document)])
}

/// A `200` envelope holding several resource documents, in order.
#[must_use]
pub fn resources(documents: Vec<(String, Value)>) -> Response {
    envelope(StatusCode::OK, documents.into_iter().collect())
}

/// An error envelope: `{"error": {"status": …, "message": …}}`.
#[must_use]
pub fn error(status: StatusCode, message: &str) -> Response {
    let mut document = Map::new();
    document.insert(
        "error".to_string(),
        serde_json::json!({
            "status": status.as_u16(),
            "message": message,
        }),
    );
    envelope(status, document)
}

/// A raw JPEG body (the image resource is the one non-JSON response).
#[must_use]
pub fn jpeg(bytes: Vec<u8>) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "image/jpeg")],
        bytes,
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_string(response: Response) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn should_pretty_print_with_trailing_newline() {
        let response = resource("controller", serde_json::json!({"enabled": true}));
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_string(response).await;
        assert!(body.ends_with('\n'));
        assert_eq!(
            body,
            "{\n  \"controller\": {\n    \"enabled\": true\n  }\n}\n"
        );
    }

    #[tokio::test]
    async fn should_render_error_document() {
        let response = error(StatusCode::NOT_FOUND, "Not Found");
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body: serde_json::Value =
            serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(body["error"]["status"], 404);
        assert_eq!(body["error"]["message"], "Not Found");
    }

    #[tokio::test]
    async fn should_render_multiple_resources_in_one_document() {
        let response = resources(vec![
            ("moisture".to_string(), serde_json::json!(1)),
            ("temperature".to_string(), serde_json::json!(2)),
        ]);
        let body: serde_json::Value =
            serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(body, serde_json::json!({"moisture": 1, "temperature": 2}));
    }
}
