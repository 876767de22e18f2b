//! The [`Entity`] trait: everything the generic store, cache and event
//! pipeline need to know about a tenant-scoped record type.

use std::fmt::Debug;

use kennel_core::entity_kind::EntityKind;
use kennel_core::error::CoreError;
use kennel_core::types::{DbId, Timestamp};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// A tenant-scoped, soft-deletable record.
///
/// Implementors serialize with camelCase field names; the in-memory store
/// and the cache both rely on that JSON shape (`id`, `projectId`,
/// `createdAt`, `deletedAt`, ...).
pub trait Entity:
    Serialize + DeserializeOwned + Clone + Debug + PartialEq + Send + Sync + Unpin + 'static
{
    const KIND: EntityKind;

    /// Fixed ordering key for list queries.
    const SORT_KEY: SortKey;

    /// Insert payload. Never carries `projectId` or actor fields.
    type Create: Serialize + DeserializeOwned + Clone + Debug + Send + Sync + 'static;

    /// Patch payload; every field optional, `None` leaves the column as is.
    type Update: Serialize + DeserializeOwned + Clone + Debug + Send + Sync + 'static;

    /// Equality filters for list queries; every field optional.
    type Filter: Serialize + DeserializeOwned + Default + Clone + Debug + Send + Sync + 'static;

    fn id(&self) -> DbId;
    fn project_id(&self) -> DbId;
    fn deleted_at(&self) -> Option<Timestamp>;

    fn validate_create(input: &Self::Create) -> Result<(), CoreError>;
    fn validate_update(input: &Self::Update) -> Result<(), CoreError>;
}

/// Sort keys used by list queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    CreatedAt,
    Name,
}

impl SortKey {
    /// SQL column name.
    pub const fn column(self) -> &'static str {
        match self {
            Self::CreatedAt => "created_at",
            Self::Name => "name",
        }
    }

    /// Serialized (camelCase) field name.
    pub const fn field(self) -> &'static str {
        match self {
            Self::CreatedAt => "createdAt",
            Self::Name => "name",
        }
    }
}

/// List criteria: the entity's equality filters plus the creation-time
/// range shared by every entity. All predicates are AND-ed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Criteria<F> {
    pub fields: F,
    pub created_after: Option<Timestamp>,
    pub created_before: Option<Timestamp>,
}

impl<F: Default> Criteria<F> {
    pub fn all() -> Self {
        Self::default()
    }
}

impl<F> Criteria<F> {
    pub fn with_fields(fields: F) -> Self {
        Self {
            fields,
            created_after: None,
            created_before: None,
        }
    }
}
