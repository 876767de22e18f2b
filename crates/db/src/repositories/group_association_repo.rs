//! SQL for the `group_associations` table.

use async_trait::async_trait;
use kennel_core::actor::Actor;
use kennel_core::types::DbId;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::group_association::{
    CreateGroupAssociation, GroupAssociation, GroupAssociationFilter, UpdateGroupAssociation,
};
use crate::store::postgres::{FilterClause, PgEntity};

const COLUMNS: &str = "id, project_id, group_id, merchant_id, metadata, \
     created_by, updated_by, deleted_by, created_at, updated_at, deleted_at";

#[async_trait]
impl PgEntity for GroupAssociation {
    const COLUMNS: &'static str = COLUMNS;

    async fn insert_row(
        pool: &PgPool,
        project_id: DbId,
        input: &CreateGroupAssociation,
        actor: &Actor,
    ) -> Result<GroupAssociation, sqlx::Error> {
        let query = format!(
            "INSERT INTO group_associations \
                (project_id, group_id, merchant_id, metadata, created_by, updated_by) \
             VALUES ($1, $2, $3, $4, $5, $5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, GroupAssociation>(&query)
            .bind(project_id)
            .bind(input.group_id)
            .bind(&input.merchant_id)
            .bind(&input.metadata)
            .bind(Json(actor))
            .fetch_one(pool)
            .await
    }

    async fn update_row(
        pool: &PgPool,
        project_id: DbId,
        id: DbId,
        input: &UpdateGroupAssociation,
        actor: &Actor,
    ) -> Result<Option<GroupAssociation>, sqlx::Error> {
        let query = format!(
            "UPDATE group_associations SET
                metadata = COALESCE($3, metadata),
                updated_by = $4,
                updated_at = NOW()
             WHERE id = $1 AND project_id = $2 AND deleted_at IS NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, GroupAssociation>(&query)
            .bind(id)
            .bind(project_id)
            .bind(&input.metadata)
            .bind(Json(actor))
            .fetch_optional(pool)
            .await
    }

    fn push_filters(filter: &GroupAssociationFilter, clause: &mut FilterClause) {
        clause.eq_uuid("group_id", filter.group_id);
        clause.eq_text("merchant_id", filter.merchant_id.as_ref());
    }
}
