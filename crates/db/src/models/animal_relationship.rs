//! Animal relationship (animal <-> customer) model and DTOs.

use kennel_core::entity_kind::EntityKind;
use kennel_core::error::CoreError;
use kennel_core::types::{DbId, Timestamp};
use kennel_core::validation::validate_optional_object;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::entity::{Entity, SortKey};
use crate::models::audit::AuditFields;

// ---------------------------------------------------------------------------
// Ownership type constants
// ---------------------------------------------------------------------------

pub const OWNERSHIP_OWNER: &str = "OWNER";
pub const OWNERSHIP_CO_OWNER: &str = "CO_OWNER";
pub const OWNERSHIP_CARETAKER: &str = "CARETAKER";
pub const OWNERSHIP_BREEDER: &str = "BREEDER";

/// All valid ownership types.
pub const VALID_OWNERSHIP_TYPES: &[&str] = &[
    OWNERSHIP_OWNER,
    OWNERSHIP_CO_OWNER,
    OWNERSHIP_CARETAKER,
    OWNERSHIP_BREEDER,
];

/// A row from the `animal_relationships` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimalRelationship {
    pub id: DbId,
    pub project_id: DbId,
    pub animal_id: DbId,
    pub customer_id: DbId,
    pub ownership_type: String,
    pub metadata: Option<serde_json::Value>,
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub audit: AuditFields,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAnimalRelationship {
    pub animal_id: DbId,
    pub customer_id: DbId,
    pub ownership_type: String,
    pub metadata: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAnimalRelationship {
    pub ownership_type: Option<String>,
    pub metadata: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimalRelationshipFilter {
    pub animal_id: Option<DbId>,
    pub customer_id: Option<DbId>,
    pub ownership_type: Option<String>,
}

/// Validate an ownership type against the known set.
pub fn validate_ownership_type(value: &str) -> Result<(), CoreError> {
    if !VALID_OWNERSHIP_TYPES.contains(&value) {
        return Err(CoreError::Validation(format!(
            "Invalid ownershipType '{}'. Valid types: {}",
            value,
            VALID_OWNERSHIP_TYPES.join(", ")
        )));
    }
    Ok(())
}

pub fn validate_create_animal_relationship(
    input: &CreateAnimalRelationship,
) -> Result<(), CoreError> {
    validate_ownership_type(&input.ownership_type)?;
    validate_optional_object("metadata", input.metadata.as_ref())
}

pub fn validate_update_animal_relationship(
    input: &UpdateAnimalRelationship,
) -> Result<(), CoreError> {
    if let Some(t) = &input.ownership_type {
        validate_ownership_type(t)?;
    }
    validate_optional_object("metadata", input.metadata.as_ref())
}

impl Entity for AnimalRelationship {
    const KIND: EntityKind = EntityKind::AnimalRelationship;
    const SORT_KEY: SortKey = SortKey::CreatedAt;

    type Create = CreateAnimalRelationship;
    type Update = UpdateAnimalRelationship;
    type Filter = AnimalRelationshipFilter;

    fn id(&self) -> DbId {
        self.id
    }

    fn project_id(&self) -> DbId {
        self.project_id
    }

    fn deleted_at(&self) -> Option<Timestamp> {
        self.audit.deleted_at
    }

    fn validate_create(input: &CreateAnimalRelationship) -> Result<(), CoreError> {
        validate_create_animal_relationship(input)
    }

    fn validate_update(input: &UpdateAnimalRelationship) -> Result<(), CoreError> {
        validate_update_animal_relationship(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_ownership_types_pass() {
        for t in VALID_OWNERSHIP_TYPES {
            assert!(validate_ownership_type(t).is_ok());
        }
    }

    #[test]
    fn lowercase_owner_is_rejected() {
        assert!(validate_ownership_type("owner").is_err());
    }
}
