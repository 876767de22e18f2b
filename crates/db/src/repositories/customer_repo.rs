//! SQL for the `customers` table.

use async_trait::async_trait;
use kennel_core::actor::Actor;
use kennel_core::types::DbId;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::customer::{CreateCustomer, Customer, CustomerFilter, UpdateCustomer};
use crate::store::postgres::{FilterClause, PgEntity};

const COLUMNS: &str = "id, project_id, first_name, last_name, email, phone, metadata, \
     created_by, updated_by, deleted_by, created_at, updated_at, deleted_at";

#[async_trait]
impl PgEntity for Customer {
    const COLUMNS: &'static str = COLUMNS;

    async fn insert_row(
        pool: &PgPool,
        project_id: DbId,
        input: &CreateCustomer,
        actor: &Actor,
    ) -> Result<Customer, sqlx::Error> {
        let query = format!(
            "INSERT INTO customers \
                (project_id, first_name, last_name, email, phone, metadata, created_by, updated_by) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $7) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Customer>(&query)
            .bind(project_id)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(&input.metadata)
            .bind(Json(actor))
            .fetch_one(pool)
            .await
    }

    async fn update_row(
        pool: &PgPool,
        project_id: DbId,
        id: DbId,
        input: &UpdateCustomer,
        actor: &Actor,
    ) -> Result<Option<Customer>, sqlx::Error> {
        let query = format!(
            "UPDATE customers SET
                first_name = COALESCE($3, first_name),
                last_name = COALESCE($4, last_name),
                email = COALESCE($5, email),
                phone = COALESCE($6, phone),
                metadata = COALESCE($7, metadata),
                updated_by = $8,
                updated_at = NOW()
             WHERE id = $1 AND project_id = $2 AND deleted_at IS NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Customer>(&query)
            .bind(id)
            .bind(project_id)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(&input.metadata)
            .bind(Json(actor))
            .fetch_optional(pool)
            .await
    }

    fn push_filters(filter: &CustomerFilter, clause: &mut FilterClause) {
        clause.eq_text("email", filter.email.as_ref());
        clause.eq_text("last_name", filter.last_name.as_ref());
    }
}
