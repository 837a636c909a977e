//! Axum router assembly.

use axum::Router;
use axum::http::StatusCode;
use axum::routing::get;
use tower_http::trace::TraceLayer;

use sprout_app::ports::{ActuatorGateway, CameraCapture, SensorReader};

use crate::api::{actuators, controller, image, sensors};
use crate::error::ApiError;
use crate::state::AppState;

/// Build the top-level axum [`Router`].
///
/// Known paths answer unsupported methods with the `405` envelope (via the
/// per-route method fallback) and everything else falls through to the
/// `404` envelope, so the server never leaves a request unanswered or
/// un-enveloped. A [`TraceLayer`] logs each request/response through the
/// `tracing` ecosystem.
pub fn build<S, A, C>(state: AppState<S, A, C>) -> Router
where
    S: SensorReader + 'static,
    A: ActuatorGateway + 'static,
    C: CameraCapture + 'static,
{
    Router::new()
        .route("/", get(liveness).fallback(method_not_allowed))
        .route(
            "/sensors",
            get(sensors::list::<S, A, C>).fallback(method_not_allowed),
        )
        .route(
            "/sensors/{name}",
            get(sensors::get::<S, A, C>).fallback(method_not_allowed),
        )
        .route(
            "/actuators",
            get(actuators::list::<S, A, C>).fallback(method_not_allowed),
        )
        .route(
            "/actuators/{name}",
            get(actuators::get::<S, A, C>)
                .patch(actuators::set::<S, A, C>)
                .fallback(method_not_allowed),
        )
        .route(
            "/controller",
            get(controller::get::<S, A, C>)
                .patch(controller::set::<S, A, C>)
                .fallback(method_not_allowed),
        )
        .route(
            "/image",
            get(image::get::<S, A, C>).fallback(method_not_allowed),
        )
        .fallback(unknown_path)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn liveness() -> StatusCode {
    StatusCode::NO_CONTENT
}

async fn method_not_allowed() -> ApiError {
    ApiError::method_not_allowed()
}

async fn unknown_path() -> ApiError {
    ApiError::route_not_found()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{BTreeMap, HashMap};
    use std::sync::{Arc, Mutex};

    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use sprout_app::indicators::IndicatorChannels;
    use sprout_app::services::actuator_service::ActuatorService;
    use sprout_app::services::controller_service::ControllerService;
    use sprout_app::services::sensor_service::SensorService;
    use sprout_app::settings_store::SettingsStore;
    use sprout_domain::error::SproutError;
    use sprout_domain::reading::RawSample;
    use sprout_domain::settings::{ActuatorConfig, ControllerSettings, SensorSpec};

    struct StubSensors {
        values: HashMap<String, f64>,
    }

    impl SensorReader for StubSensors {
        async fn read(&self, name: &str) -> Result<RawSample, SproutError> {
            self.values
                .get(name)
                .map(|value| RawSample {
                    value: *value,
                    timestamp: 1_700_000_000,
                })
                .ok_or_else(|| SproutError::sensor_unavailable(name, "no published value"))
        }
    }

    #[derive(Default)]
    struct StubGateway {
        states: Mutex<HashMap<String, bool>>,
        writes: Mutex<Vec<(String, bool)>>,
    }

    impl ActuatorGateway for StubGateway {
        async fn read_state(&self, channel: &str) -> Result<bool, SproutError> {
            Ok(*self.states.lock().unwrap().get(channel).unwrap_or(&false))
        }

        async fn write_state(&self, channel: &str, on: bool) -> Result<(), SproutError> {
            self.states.lock().unwrap().insert(channel.to_string(), on);
            self.writes.lock().unwrap().push((channel.to_string(), on));
            Ok(())
        }
    }

    struct StubCamera;

    impl CameraCapture for StubCamera {
        async fn capture(&self) -> Result<Vec<u8>, SproutError> {
            Ok(b"JPEGDATA".to_vec())
        }
    }

    fn settings_store(controller_enabled: bool) -> Arc<SettingsStore> {
        let mut sensors = BTreeMap::new();
        sensors.insert(
            "moisture".to_string(),
            SensorSpec {
                units: "%".to_string(),
            },
        );
        sensors.insert(
            "temperature".to_string(),
            SensorSpec {
                units: "C".to_string(),
            },
        );
        let mut actuators = BTreeMap::new();
        actuators.insert(
            "watering".to_string(),
            ActuatorConfig {
                channel: "watering".to_string(),
                sensor: Some("moisture".to_string()),
                threshold: 40.0,
                deviation: 5.0,
                enabled: false,
            },
        );
        Arc::new(SettingsStore::new(
            ControllerSettings {
                enabled: controller_enabled,
                interval: 60,
            },
            actuators,
            sensors,
        ))
    }

    struct TestApp {
        router: Router,
        store: Arc<SettingsStore>,
        gateway: Arc<StubGateway>,
    }

    fn app(controller_enabled: bool) -> TestApp {
        let store = settings_store(controller_enabled);
        let gateway = Arc::new(StubGateway::default());
        let sensors = StubSensors {
            values: HashMap::from([
                ("moisture".to_string(), 43.2),
                ("temperature".to_string(), 21.5),
            ]),
        };
        let state = AppState::new(
            SensorService::new(Arc::clone(&store), sensors),
            ActuatorService::new(Arc::clone(&store), Arc::clone(&gateway)),
            ControllerService::new(
                Arc::clone(&store),
                Arc::clone(&gateway),
                IndicatorChannels::default(),
            ),
            StubCamera,
        );
        TestApp {
            router: build(state),
            store,
            gateway,
        }
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn patch_request(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("PATCH")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_string(response: axum::response::Response) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        serde_json::from_str(&body_string(response).await).unwrap()
    }

    #[tokio::test]
    async fn should_answer_liveness_with_no_content() {
        let resp = app(false).router.oneshot(get_request("/")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);
        assert!(body_string(resp).await.is_empty());
    }

    #[tokio::test]
    async fn should_list_all_sensors() {
        let resp = app(false)
            .router
            .oneshot(get_request("/sensors"))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let body = body_json(resp).await;
        assert_eq!(body["moisture"]["value"], 43.2);
        assert_eq!(body["moisture"]["units"], "%");
        assert_eq!(body["temperature"]["value"], 21.5);
    }

    #[tokio::test]
    async fn should_read_one_sensor_with_units_and_timestamp() {
        let resp = app(false)
            .router
            .oneshot(get_request("/sensors/temperature"))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers()["content-type"].to_str().unwrap(),
            "application/json"
        );

        let raw = body_string(resp).await;
        assert!(raw.ends_with('\n'));
        let body: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "temperature": {"units": "C", "timestamp": 1_700_000_000, "value": 21.5}
            })
        );
    }

    #[tokio::test]
    async fn should_return_404_for_unknown_sensor() {
        let resp = app(false)
            .router
            .oneshot(get_request("/sensors/ph"))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body = body_json(resp).await;
        assert_eq!(body["error"]["status"], 404);
    }

    #[tokio::test]
    async fn should_surface_unavailable_sensor_as_internal_error() {
        // Configured sensor with nothing published yet.
        let store = settings_store(false);
        let state = AppState::new(
            SensorService::new(
                Arc::clone(&store),
                StubSensors {
                    values: HashMap::new(),
                },
            ),
            ActuatorService::new(Arc::clone(&store), Arc::new(StubGateway::default())),
            ControllerService::new(
                store,
                Arc::new(StubGateway::default()),
                IndicatorChannels::default(),
            ),
            StubCamera,
        );
        let resp = build(state)
            .oneshot(get_request("/sensors/temperature"))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(resp).await;
        assert_eq!(body["error"]["status"], 500);
    }

    #[tokio::test]
    async fn should_list_actuators_with_live_state() {
        let test = app(false);
        test.gateway
            .states
            .lock()
            .unwrap()
            .insert("watering".to_string(), true);

        let resp = test.router.oneshot(get_request("/actuators")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let body = body_json(resp).await;
        assert_eq!(body["watering"]["enabled"], true);
        assert_eq!(body["watering"]["threshold"], 40.0);
        assert_eq!(body["watering"]["sensor"], "moisture");
    }

    #[tokio::test]
    async fn should_return_404_for_unknown_actuator() {
        let resp = app(false)
            .router
            .oneshot(get_request("/actuators/doesnotexist"))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body = body_json(resp).await;
        assert_eq!(body["error"]["status"], 404);
        assert_eq!(body["error"]["message"], "actuator 'doesnotexist' not found");
    }

    #[tokio::test]
    async fn should_apply_manual_actuator_write_while_controller_disabled() {
        let test = app(false);
        let resp = test
            .router
            .oneshot(patch_request("/actuators/watering", r#"{"enabled": true}"#))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let body = body_json(resp).await;
        assert_eq!(body["watering"]["enabled"], true);
        assert_eq!(
            *test.gateway.writes.lock().unwrap(),
            vec![("watering".to_string(), true)]
        );
        assert!(test.store.actuator("watering").unwrap().enabled);
    }

    #[tokio::test]
    async fn should_reject_manual_actuator_write_while_controller_enabled() {
        let test = app(true);
        let resp = test
            .router
            .oneshot(patch_request("/actuators/watering", r#"{"enabled": true}"#))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);

        let body = body_json(resp).await;
        assert_eq!(
            body,
            serde_json::json!({
                "error": {
                    "status": 403,
                    "message": "Cannot set actuators while the controller is enabled."
                }
            })
        );
        // Commanded state untouched.
        assert!(test.gateway.writes.lock().unwrap().is_empty());
        assert!(!test.store.actuator("watering").unwrap().enabled);
    }

    #[tokio::test]
    async fn should_reject_patch_on_actuator_collection() {
        let resp = app(false)
            .router
            .oneshot(patch_request("/actuators", r#"{"enabled": true}"#))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
        let body = body_json(resp).await;
        assert_eq!(body["error"]["status"], 405);
    }

    #[tokio::test]
    async fn should_reject_patch_on_sensors() {
        let resp = app(false)
            .router
            .oneshot(patch_request("/sensors/temperature", r#"{"value": 1}"#))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn should_reject_patch_on_root() {
        let resp = app(false)
            .router
            .oneshot(patch_request("/", "{}"))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn should_reject_unsupported_methods_on_known_paths() {
        let resp = app(false)
            .router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/controller")
                    .body(Body::from("{}"))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
        let body = body_json(resp).await;
        assert_eq!(body["error"]["message"], "Method Not Allowed");
    }

    #[tokio::test]
    async fn should_return_controller_settings() {
        let resp = app(false)
            .router
            .oneshot(get_request("/controller"))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_json(resp).await;
        assert_eq!(
            body,
            serde_json::json!({"controller": {"enabled": false, "interval": 60}})
        );
    }

    #[tokio::test]
    async fn should_merge_controller_settings_and_write_indicator() {
        let test = app(false);
        let resp = test
            .router
            .oneshot(patch_request("/controller", r#"{"enabled": true}"#))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let body = body_json(resp).await;
        assert_eq!(body["controller"]["enabled"], true);
        assert_eq!(body["controller"]["interval"], 60);
        assert_eq!(
            *test.gateway.writes.lock().unwrap(),
            vec![("controller-indicator".to_string(), true)]
        );
    }

    #[tokio::test]
    async fn should_cascade_actuator_shutdown_when_controller_disabled() {
        let test = app(true);
        test.store.record_command("watering", true).unwrap();

        let resp = test
            .router
            .oneshot(patch_request("/controller", r#"{"enabled": false}"#))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let writes = test.gateway.writes.lock().unwrap().clone();
        assert!(writes.contains(&("controller-indicator".to_string(), false)));
        assert!(writes.contains(&("watering".to_string(), false)));
        assert!(!test.store.actuator("watering").unwrap().enabled);
    }

    #[tokio::test]
    async fn should_surface_malformed_patch_body_as_internal_error() {
        let resp = app(false)
            .router
            .oneshot(patch_request("/controller", "{not json"))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(resp).await;
        assert_eq!(body["error"]["status"], 500);
    }

    #[tokio::test]
    async fn should_return_404_for_unknown_paths() {
        let resp = app(false)
            .router
            .oneshot(get_request("/greenhouse"))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body = body_json(resp).await;
        assert_eq!(body["error"]["message"], "Not Found");
    }

    #[tokio::test]
    async fn should_serve_jpeg_image() {
        let resp = app(false).router.oneshot(get_request("/image")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers()["content-type"].to_str().unwrap(),
            "image/jpeg"
        );
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(bytes.as_ref(), b"JPEGDATA");
    }
}
