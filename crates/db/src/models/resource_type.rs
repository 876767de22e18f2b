//! Resource type model and DTOs (e.g. "Suite", "Run", "Grooming table").

use kennel_core::entity_kind::EntityKind;
use kennel_core::error::CoreError;
use kennel_core::types::{DbId, Timestamp};
use kennel_core::validation::{
    validate_optional_text, validate_required_text, MAX_DESCRIPTION_LENGTH, MAX_NAME_LENGTH,
};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::entity::{Entity, SortKey};
use crate::models::audit::AuditFields;

/// A row from the `resource_types` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceType {
    pub id: DbId,
    pub project_id: DbId,
    pub name: String,
    pub description: Option<String>,
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub audit: AuditFields,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateResourceType {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResourceType {
    pub name: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceTypeFilter {
    pub name: Option<String>,
}

pub fn validate_create_resource_type(input: &CreateResourceType) -> Result<(), CoreError> {
    validate_required_text("name", &input.name, MAX_NAME_LENGTH)?;
    validate_optional_text(
        "description",
        input.description.as_deref(),
        MAX_DESCRIPTION_LENGTH,
    )
}

pub fn validate_update_resource_type(input: &UpdateResourceType) -> Result<(), CoreError> {
    validate_optional_text("name", input.name.as_deref(), MAX_NAME_LENGTH)?;
    validate_optional_text(
        "description",
        input.description.as_deref(),
        MAX_DESCRIPTION_LENGTH,
    )
}

impl Entity for ResourceType {
    const KIND: EntityKind = EntityKind::ResourceType;
    const SORT_KEY: SortKey = SortKey::CreatedAt;

    type Create = CreateResourceType;
    type Update = UpdateResourceType;
    type Filter = ResourceTypeFilter;

    fn id(&self) -> DbId {
        self.id
    }

    fn project_id(&self) -> DbId {
        self.project_id
    }

    fn deleted_at(&self) -> Option<Timestamp> {
        self.audit.deleted_at
    }

    fn validate_create(input: &CreateResourceType) -> Result<(), CoreError> {
        validate_create_resource_type(input)
    }

    fn validate_update(input: &UpdateResourceType) -> Result<(), CoreError> {
        validate_update_resource_type(input)
    }
}
