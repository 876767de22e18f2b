//! SQL for the `contacts` table.

use async_trait::async_trait;
use kennel_core::actor::Actor;
use kennel_core::types::DbId;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::contact::{Contact, ContactFilter, CreateContact, UpdateContact};
use crate::store::postgres::{FilterClause, PgEntity};

const COLUMNS: &str = "id, project_id, customer_id, name, email, phone, relation, \
     created_by, updated_by, deleted_by, created_at, updated_at, deleted_at";

#[async_trait]
impl PgEntity for Contact {
    const COLUMNS: &'static str = COLUMNS;

    async fn insert_row(
        pool: &PgPool,
        project_id: DbId,
        input: &CreateContact,
        actor: &Actor,
    ) -> Result<Contact, sqlx::Error> {
        let query = format!(
            "INSERT INTO contacts \
                (project_id, customer_id, name, email, phone, relation, created_by, updated_by) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $7) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Contact>(&query)
            .bind(project_id)
            .bind(input.customer_id)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(&input.relation)
            .bind(Json(actor))
            .fetch_one(pool)
            .await
    }

    async fn update_row(
        pool: &PgPool,
        project_id: DbId,
        id: DbId,
        input: &UpdateContact,
        actor: &Actor,
    ) -> Result<Option<Contact>, sqlx::Error> {
        let query = format!(
            "UPDATE contacts SET
                name = COALESCE($3, name),
                email = COALESCE($4, email),
                phone = COALESCE($5, phone),
                relation = COALESCE($6, relation),
                updated_by = $7,
                updated_at = NOW()
             WHERE id = $1 AND project_id = $2 AND deleted_at IS NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Contact>(&query)
            .bind(id)
            .bind(project_id)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(&input.relation)
            .bind(Json(actor))
            .fetch_optional(pool)
            .await
    }

    fn push_filters(filter: &ContactFilter, clause: &mut FilterClause) {
        clause.eq_uuid("customer_id", filter.customer_id);
    }
}
