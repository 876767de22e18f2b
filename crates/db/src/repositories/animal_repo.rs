//! SQL for the `animals` table.

use async_trait::async_trait;
use kennel_core::actor::Actor;
use kennel_core::types::DbId;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::animal::{Animal, AnimalFilter, CreateAnimal, UpdateAnimal};
use crate::store::postgres::{FilterClause, PgEntity};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, project_id, name, species_id, sex, date_of_birth, metadata, \
     created_by, updated_by, deleted_by, created_at, updated_at, deleted_at";

#[async_trait]
impl PgEntity for Animal {
    const COLUMNS: &'static str = COLUMNS;

    async fn insert_row(
        pool: &PgPool,
        project_id: DbId,
        input: &CreateAnimal,
        actor: &Actor,
    ) -> Result<Animal, sqlx::Error> {
        let query = format!(
            "INSERT INTO animals \
                (project_id, name, species_id, sex, date_of_birth, metadata, created_by, updated_by) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $7) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Animal>(&query)
            .bind(project_id)
            .bind(&input.name)
            .bind(input.species_id)
            .bind(&input.sex)
            .bind(input.date_of_birth)
            .bind(&input.metadata)
            .bind(Json(actor))
            .fetch_one(pool)
            .await
    }

    async fn update_row(
        pool: &PgPool,
        project_id: DbId,
        id: DbId,
        input: &UpdateAnimal,
        actor: &Actor,
    ) -> Result<Option<Animal>, sqlx::Error> {
        let query = format!(
            "UPDATE animals SET
                name = COALESCE($3, name),
                species_id = COALESCE($4, species_id),
                sex = COALESCE($5, sex),
                date_of_birth = COALESCE($6, date_of_birth),
                metadata = COALESCE($7, metadata),
                updated_by = $8,
                updated_at = NOW()
             WHERE id = $1 AND project_id = $2 AND deleted_at IS NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Animal>(&query)
            .bind(id)
            .bind(project_id)
            .bind(&input.name)
            .bind(input.species_id)
            .bind(&input.sex)
            .bind(input.date_of_birth)
            .bind(&input.metadata)
            .bind(Json(actor))
            .fetch_optional(pool)
            .await
    }

    fn push_filters(filter: &AnimalFilter, clause: &mut FilterClause) {
        clause.eq_text("name", filter.name.as_ref());
        clause.eq_uuid("species_id", filter.species_id);
        clause.eq_text("sex", filter.sex.as_ref());
    }
}
