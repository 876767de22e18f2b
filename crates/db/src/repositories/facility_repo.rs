//! SQL for the `facilities` table.

use async_trait::async_trait;
use kennel_core::actor::Actor;
use kennel_core::types::DbId;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::facility::{CreateFacility, Facility, FacilityFilter, UpdateFacility};
use crate::store::postgres::{FilterClause, PgEntity};

const COLUMNS: &str = "id, project_id, name, address, timezone, \
     created_by, updated_by, deleted_by, created_at, updated_at, deleted_at";

#[async_trait]
impl PgEntity for Facility {
    const COLUMNS: &'static str = COLUMNS;

    async fn insert_row(
        pool: &PgPool,
        project_id: DbId,
        input: &CreateFacility,
        actor: &Actor,
    ) -> Result<Facility, sqlx::Error> {
        let query = format!(
            "INSERT INTO facilities (project_id, name, address, timezone, created_by, updated_by) \
             VALUES ($1, $2, $3, $4, $5, $5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Facility>(&query)
            .bind(project_id)
            .bind(&input.name)
            .bind(&input.address)
            .bind(&input.timezone)
            .bind(Json(actor))
            .fetch_one(pool)
            .await
    }

    async fn update_row(
        pool: &PgPool,
        project_id: DbId,
        id: DbId,
        input: &UpdateFacility,
        actor: &Actor,
    ) -> Result<Option<Facility>, sqlx::Error> {
        let query = format!(
            "UPDATE facilities SET
                name = COALESCE($3, name),
                address = COALESCE($4, address),
                timezone = COALESCE($5, timezone),
                updated_by = $6,
                updated_at = NOW()
             WHERE id = $1 AND project_id = $2 AND deleted_at IS NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Facility>(&query)
            .bind(id)
            .bind(project_id)
            .bind(&input.name)
            .bind(&input.address)
            .bind(&input.timezone)
            .bind(Json(actor))
            .fetch_optional(pool)
            .await
    }

    fn push_filters(filter: &FacilityFilter, clause: &mut FilterClause) {
        clause.eq_text("name", filter.name.as_ref());
    }
}
