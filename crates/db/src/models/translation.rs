//! Locale-keyed dictionary translations.
//!
//! Translations are global reference data (not tenant-scoped) and read-only
//! through the API. Each row belongs to a parent dictionary entry (a species
//! or a reference value) and is unique per `(parent, locale)`.

use kennel_core::entity_kind::EntityKind;
use kennel_core::types::{DbId, Timestamp};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use sqlx::postgres::PgRow;
use sqlx::FromRow;

/// Shared shape of the translation tables.
pub trait Translation:
    Serialize + DeserializeOwned + Clone + std::fmt::Debug + PartialEq + Send + Sync + Unpin
    + for<'r> FromRow<'r, PgRow>
    + 'static
{
    const KIND: EntityKind;
    const PARENT_KIND: EntityKind;
    /// SQL column holding the parent id.
    const PARENT_COLUMN: &'static str;

    fn id(&self) -> DbId;
    fn parent_id(&self) -> DbId;
    fn locale(&self) -> &str;
    fn name(&self) -> &str;
    fn deleted_at(&self) -> Option<Timestamp>;
}

/// A row from the `species_translations` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeciesTranslation {
    pub id: DbId,
    pub species_id: DbId,
    pub locale: String,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}

/// A row from the `reference_value_translations` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceValueTranslation {
    pub id: DbId,
    pub reference_value_id: DbId,
    pub locale: String,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}

impl Translation for SpeciesTranslation {
    const KIND: EntityKind = EntityKind::SpeciesTranslation;
    const PARENT_KIND: EntityKind = EntityKind::Species;
    const PARENT_COLUMN: &'static str = "species_id";

    fn id(&self) -> DbId {
        self.id
    }

    fn parent_id(&self) -> DbId {
        self.species_id
    }

    fn locale(&self) -> &str {
        &self.locale
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn deleted_at(&self) -> Option<Timestamp> {
        self.deleted_at
    }
}

impl Translation for ReferenceValueTranslation {
    const KIND: EntityKind = EntityKind::ReferenceValueTranslation;
    const PARENT_KIND: EntityKind = EntityKind::ReferenceValue;
    const PARENT_COLUMN: &'static str = "reference_value_id";

    fn id(&self) -> DbId {
        self.id
    }

    fn parent_id(&self) -> DbId {
        self.reference_value_id
    }

    fn locale(&self) -> &str {
        &self.locale
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn deleted_at(&self) -> Option<Timestamp> {
        self.deleted_at
    }
}

/// List criteria for a parent's translations.
#[derive(Debug, Clone, Default)]
pub struct TranslationCriteria {
    pub parent_id: Option<DbId>,
    pub locale: Option<String>,
}

impl TranslationCriteria {
    pub fn for_parent(parent_id: DbId) -> Self {
        Self {
            parent_id: Some(parent_id),
            locale: None,
        }
    }
}
