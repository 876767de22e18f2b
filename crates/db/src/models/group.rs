//! Organization group model and DTOs.

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

#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
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
pub struct CreateGroup {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateGroup {
    pub name: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupFilter {
    pub name: Option<String>,
}

impl Entity for Group {
    const KIND: EntityKind = EntityKind::Group;
    const SORT_KEY: SortKey = SortKey::Name;

    type Create = CreateGroup;
    type Update = UpdateGroup;
    type Filter = GroupFilter;

    fn id(&self) -> DbId {
        self.id
    }

    fn project_id(&self) -> DbId {
        self.project_id
    }

    fn deleted_at(&self) -> Option<Timestamp> {
        self.audit.deleted_at
    }

    fn validate_create(input: &CreateGroup) -> Result<(), CoreError> {
        validate_required_text("name", &input.name, MAX_NAME_LENGTH)?;
        validate_optional_text(
            "description",
            input.description.as_deref(),
            MAX_DESCRIPTION_LENGTH,
        )
    }

    fn validate_update(input: &UpdateGroup) -> Result<(), CoreError> {
        validate_optional_text("name", input.name.as_deref(), MAX_NAME_LENGTH)?;
        validate_optional_text(
            "description",
            input.description.as_deref(),
            MAX_DESCRIPTION_LENGTH,
        )
    }
}
