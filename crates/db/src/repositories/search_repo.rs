//! Free-text search over a tenant table.
//!
//! Matches the query case-insensitively against the whole row rendered as
//! JSON text. Returns ids only; callers hydrate the records through the
//! regular read path.

use kennel_core::types::DbId;
use sqlx::PgPool;

pub struct SearchRepo;

/// Escape `LIKE` wildcards so the query matches literally.
pub fn escape_like(query: &str) -> String {
    query
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

impl SearchRepo {
    /// Ids of active rows in `table` whose JSON text contains `query`,
    /// newest first.
    pub async fn search_ids(
        pool: &PgPool,
        table: &str,
        project_id: DbId,
        query: &str,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<DbId>, sqlx::Error> {
        let sql = format!(
            "SELECT t.id FROM {table} t \
             WHERE t.project_id = $1 AND t.deleted_at IS NULL \
               AND to_jsonb(t)::text ILIKE $2 ESCAPE '\\' \
             ORDER BY t.created_at DESC, t.id DESC \
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_scalar::<_, DbId>(&sql)
            .bind(project_id)
            .bind(format!("%{}%", escape_like(query)))
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Total number of matches for [`SearchRepo::search_ids`].
    pub async fn count(
        pool: &PgPool,
        table: &str,
        project_id: DbId,
        query: &str,
    ) -> Result<i64, sqlx::Error> {
        let sql = format!(
            "SELECT COUNT(*)::BIGINT FROM {table} t \
             WHERE t.project_id = $1 AND t.deleted_at IS NULL \
               AND to_jsonb(t)::text ILIKE $2 ESCAPE '\\'"
        );
        sqlx::query_scalar::<_, i64>(&sql)
            .bind(project_id)
            .bind(format!("%{}%", escape_like(query)))
            .fetch_one(pool)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wildcards_are_escaped() {
        assert_eq!(escape_like("50%_off"), "50\\%\\_off");
        assert_eq!(escape_like("a\\b"), "a\\\\b");
        assert_eq!(escape_like("Rex"), "Rex");
    }
}
