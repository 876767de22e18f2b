//! SQL for the `stock_ledgers` table.

use async_trait::async_trait;
use kennel_core::actor::Actor;
use kennel_core::types::DbId;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::stock_ledger::{
    CreateStockLedger, StockLedger, StockLedgerFilter, UpdateStockLedger,
};
use crate::store::postgres::{FilterClause, PgEntity};

const COLUMNS: &str = "id, project_id, sku, facility_id, quantity, reason, reference, \
     created_by, updated_by, deleted_by, created_at, updated_at, deleted_at";

#[async_trait]
impl PgEntity for StockLedger {
    const COLUMNS: &'static str = COLUMNS;

    async fn insert_row(
        pool: &PgPool,
        project_id: DbId,
        input: &CreateStockLedger,
        actor: &Actor,
    ) -> Result<StockLedger, sqlx::Error> {
        let query = format!(
            "INSERT INTO stock_ledgers \
                (project_id, sku, facility_id, quantity, reason, reference, created_by, updated_by) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $7) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, StockLedger>(&query)
            .bind(project_id)
            .bind(&input.sku)
            .bind(input.facility_id)
            .bind(input.quantity)
            .bind(&input.reason)
            .bind(&input.reference)
            .bind(Json(actor))
            .fetch_one(pool)
            .await
    }

    async fn update_row(
        pool: &PgPool,
        project_id: DbId,
        id: DbId,
        input: &UpdateStockLedger,
        actor: &Actor,
    ) -> Result<Option<StockLedger>, sqlx::Error> {
        let query = format!(
            "UPDATE stock_ledgers SET
                quantity = COALESCE($3, quantity),
                reason = COALESCE($4, reason),
                reference = COALESCE($5, reference),
                updated_by = $6,
                updated_at = NOW()
             WHERE id = $1 AND project_id = $2 AND deleted_at IS NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, StockLedger>(&query)
            .bind(id)
            .bind(project_id)
            .bind(input.quantity)
            .bind(&input.reason)
            .bind(&input.reference)
            .bind(Json(actor))
            .fetch_optional(pool)
            .await
    }

    fn push_filters(filter: &StockLedgerFilter, clause: &mut FilterClause) {
        clause.eq_text("sku", filter.sku.as_ref());
        clause.eq_uuid("facility_id", filter.facility_id);
    }
}
