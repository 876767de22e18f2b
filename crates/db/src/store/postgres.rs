//! Postgres implementations of the storage seams.
//!
//! The shared parts of every entity query (tenant scope, soft-delete filter,
//! ordering, paging, soft delete) live in [`PgStore`]. The parts that differ
//! per table (column list, insert, patch, equality filters) are supplied by
//! each entity's [`PgEntity`] impl in `crate::repositories`.

use std::marker::PhantomData;

use async_trait::async_trait;
use kennel_core::actor::Actor;
use kennel_core::pagination::PageRequest;
use kennel_core::types::{DbId, Timestamp};
use sqlx::postgres::{PgArguments, PgRow};
use sqlx::types::Json;
use sqlx::{FromRow, PgPool, Postgres};

use crate::entity::{Criteria, Entity};
use crate::models::api_key::ApiKey;
use crate::models::translation::{Translation, TranslationCriteria};
use crate::repositories::{ApiKeyRepo, TranslationRepo};
use crate::store::{ApiKeyStore, EntityStore, TranslationStore};

// ---------------------------------------------------------------------------
// Dynamic filter clauses
// ---------------------------------------------------------------------------

/// Typed bind value for dynamically-built filter queries.
#[derive(Debug, Clone, PartialEq)]
pub enum BindValue {
    Uuid(DbId),
    Text(String),
    Timestamp(Timestamp),
}

/// `AND`-joined conditions with positional placeholders, plus the values to
/// bind for them in order.
#[derive(Debug)]
pub struct FilterClause {
    conditions: Vec<String>,
    values: Vec<BindValue>,
    next_idx: u32,
}

impl FilterClause {
    /// Start numbering placeholders at `first_idx` (parameters before it are
    /// bound by the caller).
    pub fn new(first_idx: u32) -> Self {
        Self {
            conditions: Vec::new(),
            values: Vec::new(),
            next_idx: first_idx,
        }
    }

    /// Add `column <op> $n`.
    pub fn push(&mut self, column: &str, op: &str, value: BindValue) {
        self.conditions
            .push(format!("{column} {op} ${}", self.next_idx));
        self.values.push(value);
        self.next_idx += 1;
    }

    pub fn eq_uuid(&mut self, column: &str, value: Option<DbId>) {
        if let Some(v) = value {
            self.push(column, "=", BindValue::Uuid(v));
        }
    }

    pub fn eq_text(&mut self, column: &str, value: Option<&String>) {
        if let Some(v) = value {
            self.push(column, "=", BindValue::Text(v.clone()));
        }
    }

    /// Index of the next free placeholder.
    pub fn next_idx(&self) -> u32 {
        self.next_idx
    }

    pub fn values(&self) -> &[BindValue] {
        &self.values
    }

    /// Conditions rendered as a suffix for an existing `WHERE` clause:
    /// empty, or ` AND a = $2 AND b = $3`.
    pub fn and_sql(&self) -> String {
        self.conditions
            .iter()
            .map(|c| format!(" AND {c}"))
            .collect()
    }
}

/// Bind a slice of `BindValue` to a sqlx `QueryAs`.
pub fn bind_values<'q, O>(
    mut q: sqlx::query::QueryAs<'q, Postgres, O, PgArguments>,
    values: &'q [BindValue],
) -> sqlx::query::QueryAs<'q, Postgres, O, PgArguments> {
    for val in values {
        match val {
            BindValue::Uuid(v) => q = q.bind(*v),
            BindValue::Text(v) => q = q.bind(v.as_str()),
            BindValue::Timestamp(v) => q = q.bind(*v),
        }
    }
    q
}

/// Bind a slice of `BindValue` to a sqlx `QueryScalar`.
pub fn bind_values_scalar<'q>(
    mut q: sqlx::query::QueryScalar<'q, Postgres, i64, PgArguments>,
    values: &'q [BindValue],
) -> sqlx::query::QueryScalar<'q, Postgres, i64, PgArguments> {
    for val in values {
        match val {
            BindValue::Uuid(v) => q = q.bind(*v),
            BindValue::Text(v) => q = q.bind(v.as_str()),
            BindValue::Timestamp(v) => q = q.bind(*v),
        }
    }
    q
}

// ---------------------------------------------------------------------------
// Per-table SQL
// ---------------------------------------------------------------------------

/// Table-specific SQL for an [`Entity`].
#[async_trait]
pub trait PgEntity: Entity + for<'r> FromRow<'r, PgRow> {
    /// Column list for `SELECT`/`RETURNING`, ending with the audit columns.
    const COLUMNS: &'static str;

    async fn insert_row(
        pool: &PgPool,
        project_id: DbId,
        input: &Self::Create,
        actor: &Actor,
    ) -> Result<Self, sqlx::Error>;

    /// `UPDATE ... SET col = COALESCE($n, col)` for each patchable column.
    async fn update_row(
        pool: &PgPool,
        project_id: DbId,
        id: DbId,
        input: &Self::Update,
        actor: &Actor,
    ) -> Result<Option<Self>, sqlx::Error>;

    /// Append this entity's equality filters.
    fn push_filters(filter: &Self::Filter, clause: &mut FilterClause);
}

/// Build the filter clause for a list or count query. `$1` is the project.
fn criteria_clause<E: PgEntity>(criteria: &Criteria<E::Filter>) -> FilterClause {
    let mut clause = FilterClause::new(2);
    E::push_filters(&criteria.fields, &mut clause);
    if let Some(after) = criteria.created_after {
        clause.push("created_at", ">", BindValue::Timestamp(after));
    }
    if let Some(before) = criteria.created_before {
        clause.push("created_at", "<", BindValue::Timestamp(before));
    }
    clause
}

// ---------------------------------------------------------------------------
// PgStore
// ---------------------------------------------------------------------------

/// [`EntityStore`] over a Postgres table.
pub struct PgStore<E> {
    pool: PgPool,
    _entity: PhantomData<fn() -> E>,
}

impl<E> PgStore<E> {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            _entity: PhantomData,
        }
    }
}

impl<E> Clone for PgStore<E> {
    fn clone(&self) -> Self {
        Self::new(self.pool.clone())
    }
}

#[async_trait]
impl<E: PgEntity> EntityStore<E> for PgStore<E> {
    async fn find_by_id(&self, project_id: DbId, id: DbId) -> Result<Option<E>, sqlx::Error> {
        let query = format!(
            "SELECT {} FROM {} WHERE id = $1 AND project_id = $2 AND deleted_at IS NULL",
            E::COLUMNS,
            E::KIND.table()
        );
        sqlx::query_as::<_, E>(&query)
            .bind(id)
            .bind(project_id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn list(
        &self,
        project_id: DbId,
        criteria: &Criteria<E::Filter>,
        page: &PageRequest,
    ) -> Result<Vec<E>, sqlx::Error> {
        let clause = criteria_clause::<E>(criteria);
        let dir = page.order.as_sql();
        let query = format!(
            "SELECT {cols} FROM {table} \
             WHERE project_id = $1 AND deleted_at IS NULL{filters} \
             ORDER BY {sort} {dir}, id {dir} \
             LIMIT ${limit_idx} OFFSET ${offset_idx}",
            cols = E::COLUMNS,
            table = E::KIND.table(),
            filters = clause.and_sql(),
            sort = E::SORT_KEY.column(),
            limit_idx = clause.next_idx(),
            offset_idx = clause.next_idx() + 1,
        );
        let q = bind_values(
            sqlx::query_as::<_, E>(&query).bind(project_id),
            clause.values(),
        );
        q.bind(page.limit)
            .bind(page.offset)
            .fetch_all(&self.pool)
            .await
    }

    async fn count(
        &self,
        project_id: DbId,
        criteria: &Criteria<E::Filter>,
    ) -> Result<i64, sqlx::Error> {
        let clause = criteria_clause::<E>(criteria);
        let query = format!(
            "SELECT COUNT(*)::BIGINT FROM {} WHERE project_id = $1 AND deleted_at IS NULL{}",
            E::KIND.table(),
            clause.and_sql()
        );
        let q = bind_values_scalar(
            sqlx::query_scalar::<_, i64>(&query).bind(project_id),
            clause.values(),
        );
        q.fetch_one(&self.pool).await
    }

    async fn create(
        &self,
        project_id: DbId,
        input: &E::Create,
        actor: &Actor,
    ) -> Result<E, sqlx::Error> {
        E::insert_row(&self.pool, project_id, input, actor).await
    }

    async fn update(
        &self,
        project_id: DbId,
        id: DbId,
        input: &E::Update,
        actor: &Actor,
    ) -> Result<Option<E>, sqlx::Error> {
        E::update_row(&self.pool, project_id, id, input, actor).await
    }

    async fn soft_delete(
        &self,
        project_id: DbId,
        id: DbId,
        actor: &Actor,
    ) -> Result<Option<E>, sqlx::Error> {
        let query = format!(
            "UPDATE {} SET deleted_at = NOW(), deleted_by = $3, updated_at = NOW() \
             WHERE id = $1 AND project_id = $2 AND deleted_at IS NULL \
             RETURNING {}",
            E::KIND.table(),
            E::COLUMNS
        );
        sqlx::query_as::<_, E>(&query)
            .bind(id)
            .bind(project_id)
            .bind(Json(actor))
            .fetch_optional(&self.pool)
            .await
    }
}

// ---------------------------------------------------------------------------
// API keys and translations
// ---------------------------------------------------------------------------

#[derive(Clone)]
pub struct PgApiKeyStore {
    pool: PgPool,
}

impl PgApiKeyStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ApiKeyStore for PgApiKeyStore {
    async fn find_active_by_hash(&self, secret_hash: &str) -> Result<Option<ApiKey>, sqlx::Error> {
        ApiKeyRepo::find_active_by_hash(&self.pool, secret_hash).await
    }

    async fn create(
        &self,
        project_id: DbId,
        secret_hash: &str,
        last4: &str,
        actor: &Actor,
    ) -> Result<ApiKey, sqlx::Error> {
        ApiKeyRepo::create(&self.pool, project_id, secret_hash, last4, actor).await
    }
}

pub struct PgTranslationStore<T> {
    pool: PgPool,
    _translation: PhantomData<fn() -> T>,
}

impl<T> PgTranslationStore<T> {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            _translation: PhantomData,
        }
    }
}

#[async_trait]
impl<T: Translation> TranslationStore<T> for PgTranslationStore<T> {
    async fn find_by_locale(
        &self,
        parent_id: DbId,
        locale: &str,
    ) -> Result<Option<T>, sqlx::Error> {
        TranslationRepo::find_by_locale::<T>(&self.pool, parent_id, locale).await
    }

    async fn list(
        &self,
        criteria: &TranslationCriteria,
        page: &PageRequest,
    ) -> Result<Vec<T>, sqlx::Error> {
        TranslationRepo::list::<T>(&self.pool, criteria, page).await
    }

    async fn count(&self, criteria: &TranslationCriteria) -> Result<i64, sqlx::Error> {
        TranslationRepo::count::<T>(&self.pool, criteria).await
    }
}
