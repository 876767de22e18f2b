//! SQL for the `resource_types` table.

use async_trait::async_trait;
use kennel_core::actor::Actor;
use kennel_core::types::DbId;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::resource_type::{
    CreateResourceType, ResourceType, ResourceTypeFilter, UpdateResourceType,
};
use crate::store::postgres::{FilterClause, PgEntity};

const COLUMNS: &str = "id, project_id, name, description, \
     created_by, updated_by, deleted_by, created_at, updated_at, deleted_at";

#[async_trait]
impl PgEntity for ResourceType {
    const COLUMNS: &'static str = COLUMNS;

    async fn insert_row(
        pool: &PgPool,
        project_id: DbId,
        input: &CreateResourceType,
        actor: &Actor,
    ) -> Result<ResourceType, sqlx::Error> {
        let query = format!(
            "INSERT INTO resource_types (project_id, name, description, created_by, updated_by) \
             VALUES ($1, $2, $3, $4, $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ResourceType>(&query)
            .bind(project_id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(Json(actor))
            .fetch_one(pool)
            .await
    }

    async fn update_row(
        pool: &PgPool,
        project_id: DbId,
        id: DbId,
        input: &UpdateResourceType,
        actor: &Actor,
    ) -> Result<Option<ResourceType>, sqlx::Error> {
        let query = format!(
            "UPDATE resource_types SET
                name = COALESCE($3, name),
                description = COALESCE($4, description),
                updated_by = $5,
                updated_at = NOW()
             WHERE id = $1 AND project_id = $2 AND deleted_at IS NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ResourceType>(&query)
            .bind(id)
            .bind(project_id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(Json(actor))
            .fetch_optional(pool)
            .await
    }

    fn push_filters(filter: &ResourceTypeFilter, clause: &mut FilterClause) {
        clause.eq_text("name", filter.name.as_ref());
    }
}
