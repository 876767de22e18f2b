//! Optional free-text search collaborator.
//!
//! Without a configured provider the `/search` endpoints answer
//! `501 NOT_IMPLEMENTED`.

use async_trait::async_trait;
use kennel_core::entity_kind::EntityKind;
use kennel_core::pagination::PageRequest;
use kennel_core::types::DbId;
use kennel_db::repositories::SearchRepo;
use kennel_db::DbPool;

/// Ids matching a query, newest first, plus the total number of matches.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchHits {
    pub ids: Vec<DbId>,
    pub total: i64,
}

#[async_trait]
pub trait SearchProvider: Send + Sync {
    async fn search(
        &self,
        project_id: DbId,
        kind: EntityKind,
        query: &str,
        page: &PageRequest,
    ) -> Result<SearchHits, sqlx::Error>;
}

/// Matches against the row's JSON text with `ILIKE`.
pub struct PgSearch {
    pool: DbPool,
}

impl PgSearch {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SearchProvider for PgSearch {
    async fn search(
        &self,
        project_id: DbId,
        kind: EntityKind,
        query: &str,
        page: &PageRequest,
    ) -> Result<SearchHits, sqlx::Error> {
        let table = kind.table();
        let (ids, total) = tokio::try_join!(
            SearchRepo::search_ids(&self.pool, table, project_id, query, page.limit, page.offset),
            SearchRepo::count(&self.pool, table, project_id, query),
        )?;
        Ok(SearchHits { ids, total })
    }
}
