//! Repository for the `api_keys` table.

use kennel_core::actor::Actor;
use kennel_core::types::DbId;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::api_key::ApiKey;

const COLUMNS: &str = "id, project_id, secret_hash, last4, \
     created_by, updated_by, deleted_by, created_at, updated_at, deleted_at";

/// Lookup and provisioning of API keys.
pub struct ApiKeyRepo;

impl ApiKeyRepo {
    /// Find an active key by its secret hash. Soft-deleted (revoked) keys
    /// never match.
    pub async fn find_active_by_hash(
        pool: &PgPool,
        secret_hash: &str,
    ) -> Result<Option<ApiKey>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM api_keys WHERE secret_hash = $1 AND deleted_at IS NULL");
        sqlx::query_as::<_, ApiKey>(&query)
            .bind(secret_hash)
            .fetch_optional(pool)
            .await
    }

    /// Insert a new key. Only the hash and the last four characters are stored.
    pub async fn create(
        pool: &PgPool,
        project_id: DbId,
        secret_hash: &str,
        last4: &str,
        actor: &Actor,
    ) -> Result<ApiKey, sqlx::Error> {
        let query = format!(
            "INSERT INTO api_keys (project_id, secret_hash, last4, created_by, updated_by) \
             VALUES ($1, $2, $3, $4, $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ApiKey>(&query)
            .bind(project_id)
            .bind(secret_hash)
            .bind(last4)
            .bind(Json(actor))
            .fetch_one(pool)
            .await
    }
}
