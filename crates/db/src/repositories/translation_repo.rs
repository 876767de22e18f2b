//! Repository for the global translation tables (`species_translations`,
//! `reference_value_translations`).

use kennel_core::pagination::PageRequest;
use kennel_core::types::DbId;
use sqlx::PgPool;

use crate::models::translation::{Translation, TranslationCriteria};
use crate::store::postgres::{bind_values, bind_values_scalar, FilterClause};

fn columns<T: Translation>() -> String {
    format!(
        "id, {}, locale, name, created_at, updated_at, deleted_at",
        T::PARENT_COLUMN
    )
}

fn criteria_clause<T: Translation>(criteria: &TranslationCriteria) -> FilterClause {
    let mut clause = FilterClause::new(1);
    clause.eq_uuid(T::PARENT_COLUMN, criteria.parent_id);
    clause.eq_text("locale", criteria.locale.as_ref());
    clause
}

/// Read-only queries shared by every translation table.
pub struct TranslationRepo;

impl TranslationRepo {
    pub async fn find_by_locale<T: Translation>(
        pool: &PgPool,
        parent_id: DbId,
        locale: &str,
    ) -> Result<Option<T>, sqlx::Error> {
        let query = format!(
            "SELECT {} FROM {} WHERE {} = $1 AND locale = $2 AND deleted_at IS NULL",
            columns::<T>(),
            T::KIND.table(),
            T::PARENT_COLUMN
        );
        sqlx::query_as::<_, T>(&query)
            .bind(parent_id)
            .bind(locale)
            .fetch_optional(pool)
            .await
    }

    /// Matching translations ordered by `name`.
    pub async fn list<T: Translation>(
        pool: &PgPool,
        criteria: &TranslationCriteria,
        page: &PageRequest,
    ) -> Result<Vec<T>, sqlx::Error> {
        let clause = criteria_clause::<T>(criteria);
        let dir = page.order.as_sql();
        let query = format!(
            "SELECT {cols} FROM {table} WHERE deleted_at IS NULL{filters} \
             ORDER BY name {dir}, id {dir} \
             LIMIT ${limit_idx} OFFSET ${offset_idx}",
            cols = columns::<T>(),
            table = T::KIND.table(),
            filters = clause.and_sql(),
            limit_idx = clause.next_idx(),
            offset_idx = clause.next_idx() + 1,
        );
        let q = bind_values(sqlx::query_as::<_, T>(&query), clause.values());
        q.bind(page.limit)
            .bind(page.offset)
            .fetch_all(pool)
            .await
    }

    pub async fn count<T: Translation>(
        pool: &PgPool,
        criteria: &TranslationCriteria,
    ) -> Result<i64, sqlx::Error> {
        let clause = criteria_clause::<T>(criteria);
        let query = format!(
            "SELECT COUNT(*)::BIGINT FROM {} WHERE deleted_at IS NULL{}",
            T::KIND.table(),
            clause.and_sql()
        );
        bind_values_scalar(sqlx::query_scalar::<_, i64>(&query), clause.values())
            .fetch_one(pool)
            .await
    }
}
