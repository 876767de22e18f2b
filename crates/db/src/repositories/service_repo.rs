//! SQL for the `services` table.

use async_trait::async_trait;
use kennel_core::actor::Actor;
use kennel_core::types::DbId;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::service::{CreateService, Service, ServiceFilter, UpdateService};
use crate::store::postgres::{FilterClause, PgEntity};

const COLUMNS: &str = "id, project_id, name, description, duration_minutes, price_cents, currency, \
     created_by, updated_by, deleted_by, created_at, updated_at, deleted_at";

#[async_trait]
impl PgEntity for Service {
    const COLUMNS: &'static str = COLUMNS;

    async fn insert_row(
        pool: &PgPool,
        project_id: DbId,
        input: &CreateService,
        actor: &Actor,
    ) -> Result<Service, sqlx::Error> {
        let query = format!(
            "INSERT INTO services \
                (project_id, name, description, duration_minutes, price_cents, currency, \
                 created_by, updated_by) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $7) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Service>(&query)
            .bind(project_id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.duration_minutes)
            .bind(input.price_cents)
            .bind(&input.currency)
            .bind(Json(actor))
            .fetch_one(pool)
            .await
    }

    async fn update_row(
        pool: &PgPool,
        project_id: DbId,
        id: DbId,
        input: &UpdateService,
        actor: &Actor,
    ) -> Result<Option<Service>, sqlx::Error> {
        let query = format!(
            "UPDATE services SET
                name = COALESCE($3, name),
                description = COALESCE($4, description),
                duration_minutes = COALESCE($5, duration_minutes),
                price_cents = COALESCE($6, price_cents),
                currency = COALESCE($7, currency),
                updated_by = $8,
                updated_at = NOW()
             WHERE id = $1 AND project_id = $2 AND deleted_at IS NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Service>(&query)
            .bind(id)
            .bind(project_id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.duration_minutes)
            .bind(input.price_cents)
            .bind(&input.currency)
            .bind(Json(actor))
            .fetch_optional(pool)
            .await
    }

    fn push_filters(filter: &ServiceFilter, clause: &mut FilterClause) {
        clause.eq_text("name", filter.name.as_ref());
        clause.eq_text("currency", filter.currency.as_ref());
    }
}
