//! Health endpoint and general HTTP behaviour.

mod common;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::http::{Method, StatusCode};
use common::{body_json, send, TestApp};
use kennel_cache::{CacheBackend, CacheError, RecordCache};
use serde_json::json;

#[tokio::test]
async fn health_check_reports_backends() {
    let app = TestApp::new();
    let response = send(app.router(), Method::GET, "/health", None, None).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert!(json["version"].is_string());
    assert_eq!(json["storage"], "memory");
    assert_eq!(json["storage_healthy"], true);
    assert_eq!(json["cache"], "memory");
    assert_eq!(json["cache_healthy"], true);
}

#[tokio::test]
async fn unknown_route_returns_404() {
    let app = TestApp::new();
    let response = send(app.router(), Method::GET, "/this-route-does-not-exist", None, None).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn response_contains_x_request_id_header() {
    let app = TestApp::new();
    let response = send(app.router(), Method::GET, "/health", None, None).await;

    let request_id = response
        .headers()
        .get("x-request-id")
        .expect("Response must contain an x-request-id header");
    assert_eq!(request_id.to_str().unwrap().len(), 36);
}

#[tokio::test]
async fn cors_preflight_allows_configured_origin() {
    let app = TestApp::new();
    let request = axum::http::Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/v1/animals")
        .header("Origin", "http://localhost:5173")
        .header("Access-Control-Request-Method", "PATCH")
        .body(axum::body::Body::empty())
        .unwrap();
    let response = tower::ServiceExt::oneshot(app.router(), request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let headers = response.headers();
    assert_eq!(
        headers["access-control-allow-origin"].to_str().unwrap(),
        "http://localhost:5173"
    );
    assert!(headers["access-control-allow-methods"]
        .to_str()
        .unwrap()
        .contains("PATCH"));
}

#[tokio::test]
async fn cors_preflight_offers_only_served_methods() {
    let app = TestApp::new();
    let request = axum::http::Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/v1/customers")
        .header("Origin", "http://localhost:5173")
        .header("Access-Control-Request-Method", "DELETE")
        .body(axum::body::Body::empty())
        .unwrap();
    let response = tower::ServiceExt::oneshot(app.router(), request).await.unwrap();

    let headers = response.headers();
    let methods = headers["access-control-allow-methods"].to_str().unwrap();
    for served in ["GET", "POST", "PATCH", "DELETE"] {
        assert!(methods.contains(served), "{methods}");
    }
    assert!(!methods.contains("PUT"), "{methods}");
    assert!(headers.get("access-control-allow-credentials").is_none());
}

#[tokio::test]
async fn cross_origin_response_exposes_request_id() {
    let app = TestApp::new();
    let request = axum::http::Request::builder()
        .method(Method::GET)
        .uri("/health")
        .header("Origin", "http://localhost:5173")
        .header("x-request-id", "kennel-trace-1")
        .body(axum::body::Body::empty())
        .unwrap();
    let response = tower::ServiceExt::oneshot(app.router(), request).await.unwrap();

    let headers = response.headers();
    assert_eq!(headers["x-request-id"], "kennel-trace-1");
    assert_eq!(
        headers["access-control-expose-headers"].to_str().unwrap(),
        "x-request-id"
    );
}

// ---------------------------------------------------------------------------
// Cache outage
// ---------------------------------------------------------------------------

/// Backend whose every operation fails.
struct BrokenBackend;

#[async_trait]
impl CacheBackend for BrokenBackend {
    async fn get(&self, _key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        Err(CacheError::Backend("connection refused".into()))
    }

    async fn set(
        &self,
        _key: &str,
        _value: Vec<u8>,
        _ttl: Option<Duration>,
    ) -> Result<(), CacheError> {
        Err(CacheError::Backend("connection refused".into()))
    }

    async fn delete(&self, _key: &str) -> Result<(), CacheError> {
        Err(CacheError::Backend("connection refused".into()))
    }

    async fn health_check(&self) -> Result<(), CacheError> {
        Err(CacheError::Backend("connection refused".into()))
    }

    fn name(&self) -> &'static str {
        "broken"
    }
}

#[tokio::test]
async fn api_keeps_serving_when_cache_is_down() {
    let app = TestApp::with_cache(RecordCache::new(Arc::new(BrokenBackend), None));
    let (_, key) = app.new_tenant().await;

    let response = app
        .post_json("/api/v1/resource-types", &key, json!({"name": "Kennel"}))
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let id = body_json(response).await["id"].as_str().unwrap().to_string();

    let response = app.get(&format!("/api/v1/resource-types/{id}"), &key).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["name"], "Kennel");

    let health = body_json(send(app.router(), Method::GET, "/health", None, None).await).await;
    assert_eq!(health["status"], "ok");
    assert_eq!(health["cache"], "broken");
    assert_eq!(health["cache_healthy"], false);
}
