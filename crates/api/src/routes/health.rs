use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// `ok`, or `degraded` when storage is unreachable.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// `postgres` or `memory`.
    pub storage: &'static str,
    pub storage_healthy: bool,
    /// Cache backend name.
    pub cache: &'static str,
    /// Informational only; the cache fails open.
    pub cache_healthy: bool,
}

/// GET /health -- returns service, storage and cache health.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let services = &state.services;
    let (storage_healthy, cache_healthy) =
        tokio::join!(services.storage.is_healthy(), services.cache.is_healthy());

    let status = if storage_healthy { "ok" } else { "degraded" };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        storage: services.storage.name(),
        storage_healthy,
        cache: services.cache.backend_name(),
        cache_healthy,
    })
}

/// Mount health check routes (intended for root-level, NOT under `/api/v1`).
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
