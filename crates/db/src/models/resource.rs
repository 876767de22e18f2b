//! Bookable resource model and DTOs.

use kennel_core::entity_kind::EntityKind;
use kennel_core::error::CoreError;
use kennel_core::types::{DbId, Timestamp};
use kennel_core::validation::{
    validate_non_negative, validate_optional_text, validate_required_text,
    MAX_DESCRIPTION_LENGTH, MAX_NAME_LENGTH,
};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::entity::{Entity, SortKey};
use crate::models::audit::AuditFields;

/// A row from the `resources` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    pub id: DbId,
    pub project_id: DbId,
    pub resource_type_id: DbId,
    pub facility_id: Option<DbId>,
    pub name: String,
    pub description: Option<String>,
    /// Number of animals the resource holds at once.
    pub capacity: Option<i32>,
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub audit: AuditFields,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateResource {
    pub resource_type_id: DbId,
    pub facility_id: Option<DbId>,
    pub name: String,
    pub description: Option<String>,
    pub capacity: Option<i32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResource {
    pub resource_type_id: Option<DbId>,
    pub facility_id: Option<DbId>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub capacity: Option<i32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceFilter {
    pub resource_type_id: Option<DbId>,
    pub facility_id: Option<DbId>,
    pub name: Option<String>,
}

impl Entity for Resource {
    const KIND: EntityKind = EntityKind::Resource;
    const SORT_KEY: SortKey = SortKey::Name;

    type Create = CreateResource;
    type Update = UpdateResource;
    type Filter = ResourceFilter;

    fn id(&self) -> DbId {
        self.id
    }

    fn project_id(&self) -> DbId {
        self.project_id
    }

    fn deleted_at(&self) -> Option<Timestamp> {
        self.audit.deleted_at
    }

    fn validate_create(input: &CreateResource) -> Result<(), CoreError> {
        validate_required_text("name", &input.name, MAX_NAME_LENGTH)?;
        validate_optional_text(
            "description",
            input.description.as_deref(),
            MAX_DESCRIPTION_LENGTH,
        )?;
        validate_non_negative("capacity", input.capacity.map(i64::from))
    }

    fn validate_update(input: &UpdateResource) -> Result<(), CoreError> {
        validate_optional_text("name", input.name.as_deref(), MAX_NAME_LENGTH)?;
        validate_optional_text(
            "description",
            input.description.as_deref(),
            MAX_DESCRIPTION_LENGTH,
        )?;
        validate_non_negative("capacity", input.capacity.map(i64::from))
    }
}
