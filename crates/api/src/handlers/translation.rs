//! Read-only dictionary translation handlers.

use axum::extract::{Path, Query, State};
use axum::Json;
use kennel_core::error::CoreError;
use kennel_core::pagination::Page;
use kennel_core::types::DbId;
use kennel_core::validation::validate_locale;
use kennel_db::models::translation::{Translation, TranslationCriteria};

use crate::error::AppResult;
use crate::middleware::auth::AuthContext;
use crate::query::PaginationParams;
use crate::services::{Services, TranslationService, TranslationServices};
use crate::state::AppState;

fn service<T>(state: &AppState) -> &TranslationService<T>
where
    T: Translation,
    Services: TranslationServices<T>,
{
    TranslationServices::<T>::translation_service(state.services.as_ref())
}

/// GET /api/v1/<parent>/{parent_id}/translations
pub async fn list<T>(
    State(state): State<AppState>,
    _auth: AuthContext,
    Path(parent_id): Path<DbId>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<Page<T>>>
where
    T: Translation,
    Services: TranslationServices<T>,
{
    let page = service::<T>(&state)
        .find_all(&TranslationCriteria::for_parent(parent_id), &params.page())
        .await?;
    Ok(Json(page))
}

/// GET /api/v1/<parent>/{parent_id}/translations/{locale}
pub async fn get_by_locale<T>(
    State(state): State<AppState>,
    _auth: AuthContext,
    Path((parent_id, locale)): Path<(DbId, String)>,
) -> AppResult<Json<T>>
where
    T: Translation,
    Services: TranslationServices<T>,
{
    validate_locale(&locale)?;
    let row = service::<T>(&state)
        .find_by_locale(parent_id, &locale)
        .await?
        .ok_or_else(|| CoreError::not_found(T::KIND.name(), format!("{parent_id}/{locale}")))?;
    Ok(Json(row))
}
