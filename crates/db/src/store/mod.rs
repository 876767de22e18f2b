//! Storage seams.
//!
//! Services depend on these traits only. Each has a Postgres implementation
//! (built on the zero-sized repositories in [`crate::repositories`]) and an
//! in-memory implementation used when no `DATABASE_URL` is configured and
//! throughout the test suites.

use async_trait::async_trait;
use kennel_core::actor::Actor;
use kennel_core::pagination::PageRequest;
use kennel_core::types::DbId;

use crate::entity::{Criteria, Entity};
use crate::models::api_key::ApiKey;
use crate::models::translation::{Translation, TranslationCriteria};

pub mod memory;
pub mod postgres;

pub use memory::{MemoryApiKeyStore, MemoryStore, MemoryTranslationStore};
pub use postgres::{PgApiKeyStore, PgEntity, PgStore, PgTranslationStore};

/// Tenant-scoped, soft-delete-aware CRUD for one entity type.
///
/// Every method filters on `project_id` and ignores rows whose `deleted_at`
/// is set. Mutations return `None` when no active row matches.
#[async_trait]
pub trait EntityStore<E: Entity>: Send + Sync {
    async fn find_by_id(&self, project_id: DbId, id: DbId) -> Result<Option<E>, sqlx::Error>;

    async fn list(
        &self,
        project_id: DbId,
        criteria: &Criteria<E::Filter>,
        page: &PageRequest,
    ) -> Result<Vec<E>, sqlx::Error>;

    async fn count(
        &self,
        project_id: DbId,
        criteria: &Criteria<E::Filter>,
    ) -> Result<i64, sqlx::Error>;

    /// Insert a row with `created_by = updated_by = actor`.
    async fn create(
        &self,
        project_id: DbId,
        input: &E::Create,
        actor: &Actor,
    ) -> Result<E, sqlx::Error>;

    /// Merge the non-`None` fields of `input` and stamp `updated_by`/`updated_at`.
    async fn update(
        &self,
        project_id: DbId,
        id: DbId,
        input: &E::Update,
        actor: &Actor,
    ) -> Result<Option<E>, sqlx::Error>;

    /// Stamp `deleted_at`, `deleted_by` and `updated_at`, returning the
    /// post-delete row.
    async fn soft_delete(
        &self,
        project_id: DbId,
        id: DbId,
        actor: &Actor,
    ) -> Result<Option<E>, sqlx::Error>;
}

/// API key lookup and provisioning.
#[async_trait]
pub trait ApiKeyStore: Send + Sync {
    /// Find a key by secret hash, ignoring soft-deleted keys.
    async fn find_active_by_hash(&self, secret_hash: &str) -> Result<Option<ApiKey>, sqlx::Error>;

    async fn create(
        &self,
        project_id: DbId,
        secret_hash: &str,
        last4: &str,
        actor: &Actor,
    ) -> Result<ApiKey, sqlx::Error>;
}

/// Read-only access to a global translation table.
#[async_trait]
pub trait TranslationStore<T: Translation>: Send + Sync {
    async fn find_by_locale(&self, parent_id: DbId, locale: &str)
        -> Result<Option<T>, sqlx::Error>;

    /// Translations matching `criteria`, ordered by `name`.
    async fn list(
        &self,
        criteria: &TranslationCriteria,
        page: &PageRequest,
    ) -> Result<Vec<T>, sqlx::Error>;

    async fn count(&self, criteria: &TranslationCriteria) -> Result<i64, sqlx::Error>;
}
