//! SQL for the `organization_groups` table.

use async_trait::async_trait;
use kennel_core::actor::Actor;
use kennel_core::types::DbId;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::group::{CreateGroup, Group, GroupFilter, UpdateGroup};
use crate::store::postgres::{FilterClause, PgEntity};

const COLUMNS: &str = "id, project_id, name, description, \
     created_by, updated_by, deleted_by, created_at, updated_at, deleted_at";

#[async_trait]
impl PgEntity for Group {
    const COLUMNS: &'static str = COLUMNS;

    async fn insert_row(
        pool: &PgPool,
        project_id: DbId,
        input: &CreateGroup,
        actor: &Actor,
    ) -> Result<Group, sqlx::Error> {
        let query = format!(
            "INSERT INTO organization_groups (project_id, name, description, created_by, updated_by) \
             VALUES ($1, $2, $3, $4, $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Group>(&query)
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
        input: &UpdateGroup,
        actor: &Actor,
    ) -> Result<Option<Group>, sqlx::Error> {
        let query = format!(
            "UPDATE organization_groups SET
                name = COALESCE($3, name),
                description = COALESCE($4, description),
                updated_by = $5,
                updated_at = NOW()
             WHERE id = $1 AND project_id = $2 AND deleted_at IS NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Group>(&query)
            .bind(id)
            .bind(project_id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(Json(actor))
            .fetch_optional(pool)
            .await
    }

    fn push_filters(filter: &GroupFilter, clause: &mut FilterClause) {
        clause.eq_text("name", filter.name.as_ref());
    }
}
