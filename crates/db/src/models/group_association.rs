//! Group association: links a group to an external merchant identifier.

use kennel_core::entity_kind::EntityKind;
use kennel_core::error::CoreError;
use kennel_core::types::{DbId, Timestamp};
use kennel_core::validation::{validate_optional_object, validate_required_text, MAX_NAME_LENGTH};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::entity::{Entity, SortKey};
use crate::models::audit::AuditFields;

#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupAssociation {
    pub id: DbId,
    pub project_id: DbId,
    pub group_id: DbId,
    pub merchant_id: String,
    pub metadata: Option<serde_json::Value>,
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub audit: AuditFields,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGroupAssociation {
    pub group_id: DbId,
    pub merchant_id: String,
    pub metadata: Option<serde_json::Value>,
}

/// Only the metadata of an association is mutable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateGroupAssociation {
    pub metadata: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupAssociationFilter {
    pub group_id: Option<DbId>,
    pub merchant_id: Option<String>,
}

impl Entity for GroupAssociation {
    const KIND: EntityKind = EntityKind::GroupAssociation;
    const SORT_KEY: SortKey = SortKey::CreatedAt;

    type Create = CreateGroupAssociation;
    type Update = UpdateGroupAssociation;
    type Filter = GroupAssociationFilter;

    fn id(&self) -> DbId {
        self.id
    }

    fn project_id(&self) -> DbId {
        self.project_id
    }

    fn deleted_at(&self) -> Option<Timestamp> {
        self.audit.deleted_at
    }

    fn validate_create(input: &CreateGroupAssociation) -> Result<(), CoreError> {
        validate_required_text("merchantId", &input.merchant_id, MAX_NAME_LENGTH)?;
        validate_optional_object("metadata", input.metadata.as_ref())
    }

    fn validate_update(input: &UpdateGroupAssociation) -> Result<(), CoreError> {
        validate_optional_object("metadata", input.metadata.as_ref())
    }
}
