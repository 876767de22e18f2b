#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use kennel_api::bootstrap::provision_api_key;
use kennel_api::config::{CacheBackendKind, LogFormat, ServerConfig};
use kennel_api::router::build_app_router;
use kennel_api::search::SearchProvider;
use kennel_api::services::{Services, StorageBackend};
use kennel_api::state::AppState;
use kennel_cache::RecordCache;
use kennel_core::actor::Actor;
use kennel_core::types::DbId;
use kennel_events::{EventBus, EventPublisher};

/// Build a test `ServerConfig` with safe defaults and in-memory storage.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        database_url: None,
        database_max_connections: 1,
        cache_backend: CacheBackendKind::Memory,
        redis_url: String::new(),
        cache_ttl_secs: 0,
        search_provider: None,
        api_key_pepper: "test-pepper".to_string(),
        log_format: LogFormat::Text,
    }
}

/// In-memory services wired to `events`.
pub fn test_services(
    cache: RecordCache,
    events: Arc<EventBus>,
    search: Option<Arc<dyn SearchProvider>>,
) -> Services {
    let publisher: Arc<dyn EventPublisher> = events;
    Services::new(
        StorageBackend::Memory,
        cache,
        publisher,
        search,
        test_config().api_key_pepper,
    )
}

/// The full application over in-memory storage, plus the handles tests
/// need to observe it.
pub struct TestApp {
    pub state: AppState,
    pub events: Arc<EventBus>,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_cache(RecordCache::in_memory(None))
    }

    pub fn with_cache(cache: RecordCache) -> Self {
        let events = Arc::new(EventBus::default());
        let services = test_services(cache, Arc::clone(&events), None);
        Self::from_services(services, events)
    }

    pub fn from_services(services: Services, events: Arc<EventBus>) -> Self {
        Self {
            state: AppState::new(test_config(), services),
            events,
        }
    }

    /// The router with the same middleware stack as production.
    pub fn router(&self) -> Router {
        build_app_router(self.state.clone())
    }

    /// Provision a key for a brand-new project; returns `(project, secret)`.
    pub async fn new_tenant(&self) -> (DbId, String) {
        let project_id = DbId::new_v4();
        let secret = self.api_key_for(project_id).await;
        (project_id, secret)
    }

    pub async fn api_key_for(&self, project_id: DbId) -> String {
        provision_api_key(
            &self.state.services,
            project_id,
            &Actor::service("test", None),
        )
        .await
        .expect("provisioning a test key should succeed")
        .plaintext
    }

    pub async fn get(&self, uri: &str, token: &str) -> Response<Body> {
        send(self.router(), Method::GET, uri, Some(token), None).await
    }

    pub async fn post_json(&self, uri: &str, token: &str, body: serde_json::Value) -> Response<Body> {
        send(self.router(), Method::POST, uri, Some(token), Some(body)).await
    }

    pub async fn patch_json(
        &self,
        uri: &str,
        token: &str,
        body: serde_json::Value,
    ) -> Response<Body> {
        send(self.router(), Method::PATCH, uri, Some(token), Some(body)).await
    }

    pub async fn delete(&self, uri: &str, token: &str) -> Response<Body> {
        send(self.router(), Method::DELETE, uri, Some(token), None).await
    }
}

/// Send one request through `app`.
pub async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Collect a response body as raw bytes.
pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}
