//! Integration tests for the status routes and the middleware stack

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::*;
use serde_json::json;
use tower::ServiceExt;

fn healthy_source() -> std::sync::Arc<StubSource> {
    StubSource::new(StubBehavior::Resolve(demo_info(vec![format(
        "22",
        true,
        true,
        Some("https://example/stream.mp4"),
        Some("720p"),
    )])))
}

#[tokio::test]
async fn test_root_reports_status_and_version() {
    let (status, json) = get(app(test_config(), healthy_source()), "/").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "running");
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
    let timestamp = json["timestamp"].as_str().unwrap();
    assert!(chrono::DateTime::parse_from_rfc3339(timestamp).is_ok());
}

#[tokio::test]
async fn test_health_is_ok() {
    let (status, json) = get(app(test_config(), healthy_source()), "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({ "status": "OK" }));
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let (status, json) = get(app(test_config(), healthy_source()), "/nope").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json, json!({ "error": "route not found" }));
}

#[tokio::test]
async fn test_wrong_method_is_not_found() {
    let source = healthy_source();
    let (status, json) = get(app(test_config(), source.clone()), "/extract-link").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "route not found");

    let (status, _) = post_json(app(test_config(), source.clone()), "/health", "{}").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(source.calls(), 0);
}

#[tokio::test]
async fn test_panicking_source_yields_internal_server_error() {
    let source = StubSource::new(StubBehavior::Panic);
    let body = json!({ "videoUrl": VALID_URL }).to_string();

    let (status, json) = post_json(app(test_config(), source), "/extract-link", &body).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json, json!({ "error": "internal server error" }));
}

#[tokio::test]
async fn test_request_id_is_generated() {
    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();

    let response = app(test_config(), healthy_source())
        .oneshot(request)
        .await
        .unwrap();

    let id = response.headers().get("x-request-id").unwrap().to_str().unwrap();
    assert!(uuid::Uuid::parse_str(id).is_ok());
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let request = Request::builder()
        .uri("/health")
        .header("x-request-id", "abc-123")
        .body(Body::empty())
        .unwrap();

    let response = app(test_config(), healthy_source())
        .oneshot(request)
        .await
        .unwrap();

    assert_eq!(response.headers().get("x-request-id").unwrap(), "abc-123");
}

#[tokio::test]
async fn test_cors_preflight_is_allowed() {
    let request = Request::builder()
        .method("OPTIONS")
        .uri("/extract-link")
        .header("origin", "https://app.example")
        .header("access-control-request-method", "POST")
        .body(Body::empty())
        .unwrap();

    let response = app(test_config(), healthy_source())
        .oneshot(request)
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("access-control-allow-origin").unwrap(),
        "*"
    );
}
