//! Router-level tests: requests go through the full middleware stack
//! without opening a socket.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use mf_01_message_store::{InMemoryMessageStore, Message, MessageStoreApi, Window};
use mf_02_message_gateway::{build_router, GatewayConfig, RequestDispatcher};
use serde_json::{json, Value};
use tower::ServiceExt;

struct TestApp {
    router: Router,
    store: Arc<InMemoryMessageStore>,
    staging: tempfile::TempDir,
}

impl TestApp {
    fn new() -> Self {
        Self::with_config(GatewayConfig::default())
    }

    fn with_config(mut config: GatewayConfig) -> Self {
        let staging = tempfile::tempdir().unwrap();
        config.uploads.staging_dir = Some(staging.path().to_path_buf());

        let store = Arc::new(InMemoryMessageStore::new());
        let dispatcher = Arc::new(
            RequestDispatcher::new(store.clone()).with_feed_config(config.feed.clone()),
        );
        Self {
            router: build_router(&config, dispatcher),
            store,
            staging,
        }
    }

    async fn send(&self, req: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(req).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    async fn post_json(&self, body: Value) -> (StatusCode, Value) {
        let req = Request::builder()
            .method(Method::POST)
            .uri("/")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(req).await
    }

    async fn get(&self, uri: &str) -> (StatusCode, Value) {
        let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
        self.send(req).await
    }

    fn staging_entries(&self) -> usize {
        std::fs::read_dir(self.staging.path()).unwrap().count()
    }
}

fn text(value: &str) -> Value {
    json!({ "method": "createTextMessage", "value": value, "type": "text" })
}

const BOUNDARY: &str = "mf-gateway-boundary";

fn multipart(parts: &[(&str, &str)], file: Option<(&str, &str, &[u8])>) -> Request<Body> {
    let mut body = Vec::new();
    for (name, value) in parts {
        body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
                BOUNDARY, name, value
            )
            .as_bytes(),
        );
    }
    if let Some((filename, content_type, content)) = file {
        body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
                BOUNDARY, filename, content_type
            )
            .as_bytes(),
        );
        body.extend_from_slice(content);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());

    Request::builder()
        .method(Method::POST)
        .uri("/")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}

#[tokio::test]
async fn test_two_texts_read_newest_first() {
    let app = TestApp::new();

    let (status, body) = app.post_json(text("hello")).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!({ "responseMessage": "hello" }));
    app.post_json(text("world")).await;

    let (status, body) = app.get("/?offset=0&limit=10").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([
            { "value": "world", "type": "text" },
            { "value": "hello", "type": "text" }
        ])
    );
}

#[tokio::test]
async fn test_offset_and_limit_window() {
    let app = TestApp::new();
    for v in ["m0", "m1", "m2", "m3", "m4"] {
        app.post_json(text(v)).await;
    }

    let (_, body) = app.get("/?offset=2&limit=2").await;
    assert_eq!(
        body,
        json!([
            { "value": "m2", "type": "text" },
            { "value": "m1", "type": "text" }
        ])
    );

    let (_, body) = app.get("/?offset=10&limit=5").await;
    assert_eq!(body, json!([]));

    let (_, body) = app.get("/?limit=0").await;
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_feed_defaults_and_bad_params() {
    let app = TestApp::new();
    for i in 0..12 {
        app.post_json(text(&i.to_string())).await;
    }

    let (_, body) = app.get("/").await;
    assert_eq!(body.as_array().unwrap().len(), 10);
    assert_eq!(body[0]["value"], "11");

    let (status, body) = app.get("/any/path?offset=abc&limit=-4").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 10);
    assert_eq!(body[0]["value"], "11");
}

async fn feed_values(app: &TestApp, uri: &str) -> Vec<String> {
    let (status, body) = app.get(uri).await;
    assert_eq!(status, StatusCode::OK);
    body.as_array()
        .unwrap()
        .iter()
        .map(|m| m["value"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_repeated_query_key_uses_first_value() {
    let app = TestApp::new();
    for i in 0..20 {
        app.post_json(text(&i.to_string())).await;
    }

    assert_eq!(
        feed_values(&app, "/?offset=1&offset=5&limit=2").await,
        ["18", "17"]
    );
    assert_eq!(
        feed_values(&app, "/?limit=2&offset=3&limit=9").await,
        ["16", "15"]
    );
}

#[tokio::test]
async fn test_feed_params_read_leading_integer() {
    let app = TestApp::new();
    for i in 0..20 {
        app.post_json(text(&i.to_string())).await;
    }

    assert_eq!(
        feed_values(&app, "/?offset=2.0&limit=2").await,
        ["17", "16"]
    );
    assert_eq!(feed_values(&app, "/?limit=3abc").await, ["19", "18", "17"]);
    assert_eq!(feed_values(&app, "/?limit=1.5").await, ["19"]);
}

#[tokio::test]
async fn test_configured_feed_default_limit() {
    let mut config = GatewayConfig::default();
    config.feed.default_limit = 2;
    let app = TestApp::with_config(config);
    for v in ["a", "b", "c"] {
        app.post_json(text(v)).await;
    }

    let (_, body) = app.get("/").await;
    assert_eq!(body.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_geo_round_trip() {
    let app = TestApp::new();
    let (status, body) = app
        .post_json(json!({
            "method": "createGeoMessage",
            "latitude": 51.5,
            "longitude": -0.12,
            "type": "geo"
        }))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(
        body,
        json!({ "responseLatitude": 51.5, "responseLongitude": -0.12 })
    );

    let (_, body) = app.get("/").await;
    assert_eq!(
        body,
        json!([{ "latitude": 51.5, "longitude": -0.12, "type": "geo" }])
    );
}

#[tokio::test]
async fn test_bad_coordinate_is_internal_error() {
    let app = TestApp::new();
    let (status, body) = app
        .post_json(json!({ "method": "createGeoMessage", "latitude": "north", "longitude": 1 }))
        .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Internal Server Error" }));
    assert!(app.store.is_empty());
}

#[tokio::test]
async fn test_delete_then_read_is_empty() {
    let app = TestApp::new();
    app.post_json(text("a")).await;
    app.post_json(json!({ "method": "createGeoMessage", "latitude": 1, "longitude": 2 }))
        .await;

    let (status, body) = app.post_json(json!({ "method": "deleteMessages" })).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!({ "responseMessage": "success" }));

    let (_, body) = app.get("/?offset=0&limit=100").await;
    assert_eq!(body, json!([]));

    // Deleting an empty log still succeeds
    let (status, _) = app.post_json(json!({ "method": "deleteMessages" })).await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_unknown_method_is_not_found() {
    let app = TestApp::new();
    app.post_json(text("keep")).await;

    let (status, body) = app.post_json(json!({ "method": "frobnicate" })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "Method not supported" }));
    assert_eq!(app.store.len(), 1);
}

#[tokio::test]
async fn test_malformed_json_is_internal_error() {
    let app = TestApp::new();
    let req = Request::builder()
        .method(Method::POST)
        .uri("/")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"method\":"))
        .unwrap();
    let (status, body) = app.send(req).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Internal Server Error" }));
}

#[tokio::test]
async fn test_urlencoded_text() {
    let app = TestApp::new();
    let req = Request::builder()
        .method(Method::POST)
        .uri("/messages")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from("method=createTextMessage&value=from+a+form"))
        .unwrap();
    let (status, body) = app.send(req).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!({ "responseMessage": "from a form" }));
}

#[tokio::test]
async fn test_file_upload_is_stored_and_staging_cleaned() {
    let app = TestApp::new();
    let req = multipart(
        &[
            ("method", "createFileMessage"),
            ("fileType", "image/png"),
            ("lastModified", "1700000000000"),
        ],
        Some(("pixel.png", "application/octet-stream", &[137, 80, 78, 71])),
    );

    let (status, body) = app.send(req).await;
    assert_eq!(status, StatusCode::CREATED);
    let expected = json!({
        "value": [137, 80, 78, 71],
        "filename": "pixel.png",
        "fileType": "image/png",
        "size": 4,
        "lastModified": 1700000000000u64
    });
    assert_eq!(
        body,
        json!({ "responseMessage": "File uploaded successfully", "fileData": expected })
    );

    let (_, feed) = app.get("/").await;
    assert_eq!(feed, json!([expected]));
    assert_eq!(app.staging_entries(), 0);
}

#[tokio::test]
async fn test_file_type_falls_back_to_part_content_type() {
    let app = TestApp::new();
    let req = multipart(
        &[("method", "createFileMessage")],
        Some(("notes.txt", "text/plain", b"abc")),
    );

    let (status, body) = app.send(req).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["fileData"]["fileType"], "text/plain");
    assert!(body["fileData"]["lastModified"].as_u64().unwrap() > 0);
}

#[tokio::test]
async fn test_file_command_without_file_is_bad_request() {
    let app = TestApp::new();
    let req = multipart(&[("method", "createFileMessage")], None);

    let (status, body) = app.send(req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "File not provided" }));
    assert!(app.store.is_empty());
}

#[tokio::test]
async fn test_mixed_feed_preserves_shapes() {
    let app = TestApp::new();
    app.post_json(text("first")).await;
    app.send(multipart(
        &[("method", "createFileMessage"), ("fileType", "text/plain")],
        Some(("a.txt", "text/plain", b"A")),
    ))
    .await;
    app.post_json(json!({ "method": "createGeoMessage", "latitude": 0, "longitude": 0 }))
        .await;

    let (_, body) = app.get("/").await;
    let feed = body.as_array().unwrap();
    assert_eq!(feed.len(), 3);
    assert_eq!(feed[0]["type"], "geo");
    assert_eq!(feed[1]["filename"], "a.txt");
    assert_eq!(feed[2]["value"], "first");
}

#[tokio::test]
async fn test_options_is_no_content() {
    let app = TestApp::new();
    let req = Request::builder()
        .method(Method::OPTIONS)
        .uri("/whatever")
        .body(Body::empty())
        .unwrap();
    let (status, _) = app.send(req).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_cors_preflight() {
    let app = TestApp::new();
    let req = Request::builder()
        .method(Method::OPTIONS)
        .uri("/")
        .header(header::ORIGIN, "http://localhost:3000")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .body(Body::empty())
        .unwrap();
    let response = app.router.clone().oneshot(req).await.unwrap();

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "*"
    );
    let methods = response.headers()[header::ACCESS_CONTROL_ALLOW_METHODS]
        .to_str()
        .unwrap()
        .to_string();
    for m in ["DELETE", "PUT", "PATCH", "GET", "POST"] {
        assert!(methods.contains(m), "missing {} in {}", m, methods);
    }
}

#[tokio::test]
async fn test_cors_and_request_id_on_simple_request() {
    let app = TestApp::new();
    let req = Request::builder()
        .uri("/")
        .header(header::ORIGIN, "http://localhost:3000")
        .body(Body::empty())
        .unwrap();
    let response = app.router.clone().oneshot(req).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "*"
    );
    assert!(response.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn test_oversized_body_is_rejected() {
    let mut config = GatewayConfig::default();
    config.limits.max_request_size = 64;
    let app = TestApp::with_config(config);

    let long = "x".repeat(1024);
    let (status, body) = app.post_json(text(&long)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Internal Server Error" }));
    assert!(app.store.is_empty());
}

/// Store whose writes blow up, for exercising the panic path.
struct PanickingStore;

impl MessageStoreApi for PanickingStore {
    fn append(&self, _message: Message) {
        panic!("store write failed");
    }

    fn clear(&self) {}

    fn query(&self, _window: Window) -> Vec<Message> {
        Vec::new()
    }

    fn len(&self) -> usize {
        0
    }
}

#[tokio::test]
async fn test_handler_panic_is_internal_error_with_cors() {
    let config = GatewayConfig::default();
    let router = build_router(
        &config,
        Arc::new(RequestDispatcher::new(Arc::new(PanickingStore))),
    );

    let req = Request::builder()
        .method(Method::POST)
        .uri("/")
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::ORIGIN, "http://localhost:3000")
        .body(Body::from(text("boom").to_string()))
        .unwrap();
    let response = router.oneshot(req).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "*"
    );
    assert!(response.headers().contains_key("x-request-id"));

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body, json!({ "error": "Internal Server Error" }));
}
