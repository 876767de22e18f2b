//! SQL for the `animal_relationships` table.

use async_trait::async_trait;
use kennel_core::actor::Actor;
use kennel_core::types::DbId;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::animal_relationship::{
    AnimalRelationship, AnimalRelationshipFilter, CreateAnimalRelationship,
    UpdateAnimalRelationship,
};
use crate::store::postgres::{FilterClause, PgEntity};

const COLUMNS: &str = "id, project_id, animal_id, customer_id, ownership_type, metadata, \
     created_by, updated_by, deleted_by, created_at, updated_at, deleted_at";

#[async_trait]
impl PgEntity for AnimalRelationship {
    const COLUMNS: &'static str = COLUMNS;

    async fn insert_row(
        pool: &PgPool,
        project_id: DbId,
        input: &CreateAnimalRelationship,
        actor: &Actor,
    ) -> Result<AnimalRelationship, sqlx::Error> {
        let query = format!(
            "INSERT INTO animal_relationships \
                (project_id, animal_id, customer_id, ownership_type, metadata, created_by, updated_by) \
             VALUES ($1, $2, $3, $4, $5, $6, $6) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AnimalRelationship>(&query)
            .bind(project_id)
            .bind(input.animal_id)
            .bind(input.customer_id)
            .bind(&input.ownership_type)
            .bind(&input.metadata)
            .bind(Json(actor))
            .fetch_one(pool)
            .await
    }

    async fn update_row(
        pool: &PgPool,
        project_id: DbId,
        id: DbId,
        input: &UpdateAnimalRelationship,
        actor: &Actor,
    ) -> Result<Option<AnimalRelationship>, sqlx::Error> {
        let query = format!(
            "UPDATE animal_relationships SET
                ownership_type = COALESCE($3, ownership_type),
                metadata = COALESCE($4, metadata),
                updated_by = $5,
                updated_at = NOW()
             WHERE id = $1 AND project_id = $2 AND deleted_at IS NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AnimalRelationship>(&query)
            .bind(id)
            .bind(project_id)
            .bind(&input.ownership_type)
            .bind(&input.metadata)
            .bind(Json(actor))
            .fetch_optional(pool)
            .await
    }

    fn push_filters(filter: &AnimalRelationshipFilter, clause: &mut FilterClause) {
        clause.eq_uuid("animal_id", filter.animal_id);
        clause.eq_uuid("customer_id", filter.customer_id);
        clause.eq_text("ownership_type", filter.ownership_type.as_ref());
    }
}
