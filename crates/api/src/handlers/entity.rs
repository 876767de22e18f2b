//! Generic CRUD handlers, instantiated once per tenant entity in
//! [`crate::routes`].
//!
//! Every handler takes its tenant scope from [`AuthContext`]; a `projectId`
//! in the body or query string is never honored.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use kennel_core::error::CoreError;
use kennel_core::pagination::Page;
use kennel_core::types::DbId;
use kennel_db::Entity;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthContext;
use crate::query::{ListParams, SearchParams};
use crate::services::{EntityService, EntityServices, Services};
use crate::state::AppState;

pub(crate) fn service<E>(state: &AppState) -> &EntityService<E>
where
    E: Entity,
    Services: EntityServices<E>,
{
    EntityServices::<E>::entity_service(state.services.as_ref())
}

/// GET /api/v1/<prefix>
pub async fn list<E>(
    State(state): State<AppState>,
    auth: AuthContext,
    Query(params): Query<ListParams>,
    Query(filter): Query<E::Filter>,
) -> AppResult<Json<Page<E>>>
where
    E: Entity,
    Services: EntityServices<E>,
{
    let page = params.page();
    let criteria = params.criteria(filter);
    let result = service::<E>(&state)
        .find_all(auth.project_id, &criteria, &page)
        .await?;
    Ok(Json(result))
}

/// GET /api/v1/<prefix>/search
pub async fn search<E>(
    State(state): State<AppState>,
    auth: AuthContext,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<Page<E>>>
where
    E: Entity,
    Services: EntityServices<E>,
{
    let provider = state.services.search.as_ref().ok_or_else(|| {
        CoreError::NotImplemented(format!("Search is not available for {}", E::KIND.name()))
    })?;

    let query = params
        .q
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .ok_or_else(|| AppError::BadRequest("Query parameter 'q' is required".into()))?;

    let page = params.page();
    let hits = provider
        .search(auth.project_id, E::KIND, query, &page)
        .await?;

    // Hydrate through the cached read path; rows deleted since the search
    // ran are skipped.
    let service = service::<E>(&state);
    let mut records = Vec::with_capacity(hits.ids.len());
    for id in hits.ids {
        if let Some(record) = service.find_by_id(auth.project_id, id).await? {
            records.push(record);
        }
    }

    Ok(Json(Page::new(records, hits.total, &page)))
}

/// GET /api/v1/<prefix>/{id}
pub async fn get_by_id<E>(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(id): Path<DbId>,
) -> AppResult<Json<E>>
where
    E: Entity,
    Services: EntityServices<E>,
{
    let record = service::<E>(&state)
        .find_by_id(auth.project_id, id)
        .await?
        .ok_or_else(|| CoreError::not_found(E::KIND.name(), id))?;
    Ok(Json(record))
}

/// POST /api/v1/<prefix>
pub async fn create<E>(
    State(state): State<AppState>,
    auth: AuthContext,
    Json(input): Json<E::Create>,
) -> AppResult<(StatusCode, Json<E>)>
where
    E: Entity,
    Services: EntityServices<E>,
{
    E::validate_create(&input)?;
    let record = service::<E>(&state)
        .create(auth.project_id, &input, &auth.actor())
        .await?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// PATCH /api/v1/<prefix>/{id}
///
/// Answers `201 Created`, the same status as create.
pub async fn update<E>(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(id): Path<DbId>,
    Json(input): Json<E::Update>,
) -> AppResult<(StatusCode, Json<E>)>
where
    E: Entity,
    Services: EntityServices<E>,
{
    E::validate_update(&input)?;
    let record = service::<E>(&state)
        .update(auth.project_id, id, &input, &auth.actor())
        .await?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// DELETE /api/v1/<prefix>/{id}
pub async fn delete<E>(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode>
where
    E: Entity,
    Services: EntityServices<E>,
{
    service::<E>(&state)
        .delete(auth.project_id, id, &auth.actor())
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
