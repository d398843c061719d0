//! Axum router assembly.

use axum::Router;
use axum::routing::{any, get, post};
use tower_http::trace::TraceLayer;

use devicekv_app::ports::DeviceRepository;

use crate::api;
use crate::state::AppState;

/// Build the top-level axum [`Router`].
///
/// `/devices` and `/devices/{id}` accept every method and hand the request to
/// the device handler, which answers 405 itself for anything but `GET` and
/// `POST`. Includes a [`TraceLayer`] that logs each HTTP request/response at
/// the `DEBUG` level using the `tracing` ecosystem.
pub fn build<R>(state: AppState<R>) -> Router
where
    R: DeviceRepository + Send + Sync + 'static,
{
    Router::new()
        .route("/health", get(health_check))
        .route("/devices", any(api::collection::<R>))
        .route("/devices/{id}", any(api::item::<R>))
        .route("/invoke", post(api::invoke::<R>))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::DeviceHandler;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use devicekv_app::device_store::{DEVICES_COLLECTION, KeyScheme, KvDeviceRepository, to_item};
    use devicekv_app::memory_store::InMemoryKeyValueStore;
    use devicekv_app::ports::KeyValueStore;
    use devicekv_app::services::device_service::DeviceService;
    use devicekv_domain::device::Device;
    use http_body_util::BodyExt;
    use std::sync::Arc;
    use tower::ServiceExt;

    type Repo = KvDeviceRepository<Arc<InMemoryKeyValueStore>>;

    fn app(store: &Arc<InMemoryKeyValueStore>, scheme: KeyScheme) -> Router {
        let repo: Repo = KvDeviceRepository::new(Arc::clone(store), scheme);
        build(AppState::new(DeviceHandler::new(DeviceService::new(repo))))
    }

    fn sensor() -> Device {
        Device {
            id: "id1".to_string(),
            model: "model1".to_string(),
            name: "sensor1".to_string(),
            note: "testing a sensor1".to_string(),
            serial: "serial1".to_string(),
        }
    }

    fn request(method: &str, uri: &str, body: impl Into<Body>) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .body(body.into())
            .unwrap()
    }

    async fn body_string(response: axum::response::Response) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn should_return_ok_when_health_check_called() {
        let store = Arc::new(InMemoryKeyValueStore::default());
        let response = app(&store, KeyScheme::Legacy)
            .oneshot(request("GET", "/health", Body::empty()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn should_create_device_when_posting_valid_body() {
        let store = Arc::new(InMemoryKeyValueStore::default());
        let body = serde_json::to_string(&sensor()).unwrap();

        let response = app(&store, KeyScheme::Legacy)
            .oneshot(request("POST", "/devices", body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(body_string(response).await, "HTTP 201 Created");
        assert!(store.get(DEVICES_COLLECTION, "id1").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn should_return_bad_request_when_posting_empty_object() {
        let store = Arc::new(InMemoryKeyValueStore::default());

        let response = app(&store, KeyScheme::Legacy)
            .oneshot(request("POST", "/devices", "{}"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_string(response).await,
            "Empty Field is not valid,Check the following: ID, Model, Name, Note, Serial, "
        );
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn should_report_every_field_when_body_is_not_utf8() {
        let store = Arc::new(InMemoryKeyValueStore::default());

        let response = app(&store, KeyScheme::Legacy)
            .oneshot(request("POST", "/devices", vec![0xff_u8, 0xfe]))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_string(response).await,
            "Empty Field is not valid,Check the following: ID, Model, Name, Note, Serial, "
        );
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn should_replace_invalid_utf8_inside_string_members() {
        let store = Arc::new(InMemoryKeyValueStore::default());
        let mut body = br#"{"id":"id1","deviceModel":"model1","name":"sensor"#.to_vec();
        body.push(0xff);
        body.extend_from_slice(br#"","note":"testing a sensor1","serial":"serial1"}"#);

        let created = app(&store, KeyScheme::Prefixed)
            .oneshot(request("POST", "/devices", body))
            .await
            .unwrap();
        assert_eq!(created.status(), StatusCode::CREATED);

        let fetched = app(&store, KeyScheme::Prefixed)
            .oneshot(request("GET", "/devices/id1", Body::empty()))
            .await
            .unwrap();
        let device: Device = serde_json::from_str(&body_string(fetched).await).unwrap();
        assert_eq!(device.name, "sensor\u{fffd}");
    }

    #[tokio::test]
    async fn should_return_method_not_allowed_when_body_is_not_utf8() {
        let store = Arc::new(InMemoryKeyValueStore::default());

        let response = app(&store, KeyScheme::Legacy)
            .oneshot(request("PUT", "/devices/id1", vec![0xff_u8, 0xfe]))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(body_string(response).await, "Method Not Allowed");
    }

    #[tokio::test]
    async fn should_return_device_json_when_item_exists() {
        let store = Arc::new(InMemoryKeyValueStore::default());
        store
            .put(DEVICES_COLLECTION, "/devices/id1", to_item(&sensor()))
            .await
            .unwrap();

        let response = app(&store, KeyScheme::Legacy)
            .oneshot(request("GET", "/devices/id1", Body::empty()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/json"
        );
        let device: Device = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(device, sensor());
    }

    #[tokio::test]
    async fn should_return_not_found_when_item_missing() {
        let store = Arc::new(InMemoryKeyValueStore::default());

        let response = app(&store, KeyScheme::Legacy)
            .oneshot(request("GET", "/devices/missing", Body::empty()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_string(response).await, "Not Found");
    }

    #[tokio::test]
    async fn should_return_not_found_when_get_has_no_id() {
        let store = Arc::new(InMemoryKeyValueStore::default());

        let response = app(&store, KeyScheme::Legacy)
            .oneshot(request("GET", "/devices", Body::empty()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn should_return_method_not_allowed_for_other_methods() {
        let store = Arc::new(InMemoryKeyValueStore::default());

        for method in ["PUT", "DELETE", "PATCH"] {
            let response = app(&store, KeyScheme::Legacy)
                .oneshot(request(method, "/devices/id1", Body::empty()))
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
            assert_eq!(body_string(response).await, "Method Not Allowed");
        }
    }

    #[tokio::test]
    async fn should_not_find_posted_device_when_legacy_scheme() {
        let store = Arc::new(InMemoryKeyValueStore::default());
        let body = serde_json::to_string(&sensor()).unwrap();

        let created = app(&store, KeyScheme::Legacy)
            .oneshot(request("POST", "/devices", body))
            .await
            .unwrap();
        assert_eq!(created.status(), StatusCode::CREATED);

        let fetched = app(&store, KeyScheme::Legacy)
            .oneshot(request("GET", "/devices/id1", Body::empty()))
            .await
            .unwrap();
        assert_eq!(fetched.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn should_round_trip_posted_device_when_prefixed_scheme() {
        let store = Arc::new(InMemoryKeyValueStore::default());
        let body = serde_json::to_string(&sensor()).unwrap();

        let created = app(&store, KeyScheme::Prefixed)
            .oneshot(request("POST", "/devices", body))
            .await
            .unwrap();
        assert_eq!(created.status(), StatusCode::CREATED);

        let fetched = app(&store, KeyScheme::Prefixed)
            .oneshot(request("GET", "/devices/id1", Body::empty()))
            .await
            .unwrap();
        assert_eq!(fetched.status(), StatusCode::OK);
        let device: Device = serde_json::from_str(&body_string(fetched).await).unwrap();
        assert_eq!(device, sensor());
    }

    #[tokio::test]
    async fn should_answer_raw_invocation_with_response_object() {
        let store = Arc::new(InMemoryKeyValueStore::default());
        let event = r#"{"httpMethod":"DELETE","body":null,"pathParameters":{"id":"id1"}}"#;

        let response = app(&store, KeyScheme::Legacy)
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/invoke")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(event))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"statusCode": 405, "body": "Method Not Allowed"})
        );
    }
}
