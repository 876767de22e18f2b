//! API-key authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use kennel_cache::key::api_key_cache_key;
use kennel_core::actor::Actor;
use kennel_core::api_keys::hash_api_key;
use kennel_core::error::CoreError;
use kennel_core::types::DbId;
use kennel_db::models::api_key::ApiKey;

use crate::error::AppError;
use crate::state::AppState;

/// The tenant scope and actor behind a `Bearer` API key.
///
/// ```ignore
/// async fn my_handler(auth: AuthContext) -> AppResult<Json<()>> {
///     tracing::info!(project_id = %auth.project_id, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthContext {
    /// Every read and write of the request is scoped to this project.
    pub project_id: DbId,
    pub api_key_id: DbId,
}

impl AuthContext {
    /// `{"apiKey": <id>}`, stamped on every mutation.
    pub fn actor(&self) -> Actor {
        Actor::api_key(self.api_key_id)
    }
}

impl FromRequestParts<AppState> for AuthContext {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Missing Authorization header".into(),
                ))
            })?;

        let secret = auth_header
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Invalid Authorization format. Expected: Bearer <api key>".into(),
                ))
            })?;

        let services = &state.services;
        let hash = hash_api_key(secret, &services.api_key_pepper);
        let key = find_key(state, &hash).await?.ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized("Invalid API key".into()))
        })?;

        Ok(AuthContext {
            project_id: key.project_id,
            api_key_id: key.id,
        })
    }
}

async fn find_key(state: &AppState, hash: &str) -> Result<Option<ApiKey>, AppError> {
    let services = &state.services;
    let cache_key = api_key_cache_key(hash);

    if let Some(cached) = services.cache.get::<ApiKey>(&cache_key).await {
        if cached.is_active() {
            return Ok(Some(cached));
        }
    }

    let found = services.api_keys.find_active_by_hash(hash).await?;
    if let Some(key) = &found {
        services.cache.set(&cache_key, key).await;
    }
    Ok(found)
}
