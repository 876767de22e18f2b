//! SQL for the `resources` table.

use async_trait::async_trait;
use kennel_core::actor::Actor;
use kennel_core::types::DbId;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::resource::{CreateResource, Resource, ResourceFilter, UpdateResource};
use crate::store::postgres::{FilterClause, PgEntity};

const COLUMNS: &str = "id, project_id, resource_type_id, facility_id, name, description, capacity, \
     created_by, updated_by, deleted_by, created_at, updated_at, deleted_at";

#[async_trait]
impl PgEntity for Resource {
    const COLUMNS: &'static str = COLUMNS;

    async fn insert_row(
        pool: &PgPool,
        project_id: DbId,
        input: &CreateResource,
        actor: &Actor,
    ) -> Result<Resource, sqlx::Error> {
        let query = format!(
            "INSERT INTO resources \
                (project_id, resource_type_id, facility_id, name, description, capacity, \
                 created_by, updated_by) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $7) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Resource>(&query)
            .bind(project_id)
            .bind(input.resource_type_id)
            .bind(input.facility_id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.capacity)
            .bind(Json(actor))
            .fetch_one(pool)
            .await
    }

    async fn update_row(
        pool: &PgPool,
        project_id: DbId,
        id: DbId,
        input: &UpdateResource,
        actor: &Actor,
    ) -> Result<Option<Resource>, sqlx::Error> {
        let query = format!(
            "UPDATE resources SET
                resource_type_id = COALESCE($3, resource_type_id),
                facility_id = COALESCE($4, facility_id),
                name = COALESCE($5, name),
                description = COALESCE($6, description),
                capacity = COALESCE($7, capacity),
                updated_by = $8,
                updated_at = NOW()
             WHERE id = $1 AND project_id = $2 AND deleted_at IS NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Resource>(&query)
            .bind(id)
            .bind(project_id)
            .bind(input.resource_type_id)
            .bind(input.facility_id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.capacity)
            .bind(Json(actor))
            .fetch_optional(pool)
            .await
    }

    fn push_filters(filter: &ResourceFilter, clause: &mut FilterClause) {
        clause.eq_uuid("resource_type_id", filter.resource_type_id);
        clause.eq_uuid("facility_id", filter.facility_id);
        clause.eq_text("name", filter.name.as_ref());
    }
}
