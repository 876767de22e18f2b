//! SQL for the `documents` table.

use async_trait::async_trait;
use kennel_core::actor::Actor;
use kennel_core::types::DbId;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::document::{CreateDocument, Document, DocumentFilter, UpdateDocument};
use crate::store::postgres::{FilterClause, PgEntity};

const COLUMNS: &str = "id, project_id, name, template_id, mime_type, content, \
     created_by, updated_by, deleted_by, created_at, updated_at, deleted_at";

#[async_trait]
impl PgEntity for Document {
    const COLUMNS: &'static str = COLUMNS;

    async fn insert_row(
        pool: &PgPool,
        project_id: DbId,
        input: &CreateDocument,
        actor: &Actor,
    ) -> Result<Document, sqlx::Error> {
        let query = format!(
            "INSERT INTO documents \
                (project_id, name, template_id, mime_type, content, created_by, updated_by) \
             VALUES ($1, $2, $3, $4, $5, $6, $6) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Document>(&query)
            .bind(project_id)
            .bind(&input.name)
            .bind(&input.template_id)
            .bind(&input.mime_type)
            .bind(&input.content)
            .bind(Json(actor))
            .fetch_one(pool)
            .await
    }

    async fn update_row(
        pool: &PgPool,
        project_id: DbId,
        id: DbId,
        input: &UpdateDocument,
        actor: &Actor,
    ) -> Result<Option<Document>, sqlx::Error> {
        let query = format!(
            "UPDATE documents SET
                name = COALESCE($3, name),
                mime_type = COALESCE($4, mime_type),
                content = COALESCE($5, content),
                updated_by = $6,
                updated_at = NOW()
             WHERE id = $1 AND project_id = $2 AND deleted_at IS NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Document>(&query)
            .bind(id)
            .bind(project_id)
            .bind(&input.name)
            .bind(&input.mime_type)
            .bind(&input.content)
            .bind(Json(actor))
            .fetch_optional(pool)
            .await
    }

    fn push_filters(filter: &DocumentFilter, clause: &mut FilterClause) {
        clause.eq_text("template_id", filter.template_id.as_ref());
        clause.eq_text("mime_type", filter.mime_type.as_ref());
    }
}
