//! Customer contact (emergency contact, co-owner, vet) model and DTOs.

use kennel_core::entity_kind::EntityKind;
use kennel_core::error::CoreError;
use kennel_core::types::{DbId, Timestamp};
use kennel_core::validation::{
    validate_optional_email, validate_optional_text, validate_required_text, MAX_NAME_LENGTH,
};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::entity::{Entity, SortKey};
use crate::models::audit::AuditFields;
use crate::models::customer::MAX_PHONE_LENGTH;

#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: DbId,
    pub project_id: DbId,
    pub customer_id: DbId,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    /// Free text such as "spouse" or "veterinarian".
    pub relation: Option<String>,
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub audit: AuditFields,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateContact {
    pub customer_id: DbId,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub relation: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateContact {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub relation: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactFilter {
    pub customer_id: Option<DbId>,
}

pub fn validate_create_contact(input: &CreateContact) -> Result<(), CoreError> {
    validate_required_text("name", &input.name, MAX_NAME_LENGTH)?;
    validate_optional_email("email", input.email.as_deref())?;
    validate_optional_text("phone", input.phone.as_deref(), MAX_PHONE_LENGTH)?;
    validate_optional_text("relation", input.relation.as_deref(), MAX_NAME_LENGTH)
}

pub fn validate_update_contact(input: &UpdateContact) -> Result<(), CoreError> {
    validate_optional_text("name", input.name.as_deref(), MAX_NAME_LENGTH)?;
    validate_optional_email("email", input.email.as_deref())?;
    validate_optional_text("phone", input.phone.as_deref(), MAX_PHONE_LENGTH)?;
    validate_optional_text("relation", input.relation.as_deref(), MAX_NAME_LENGTH)
}

impl Entity for Contact {
    const KIND: EntityKind = EntityKind::Contact;
    const SORT_KEY: SortKey = SortKey::CreatedAt;

    type Create = CreateContact;
    type Update = UpdateContact;
    type Filter = ContactFilter;

    fn id(&self) -> DbId {
        self.id
    }

    fn project_id(&self) -> DbId {
        self.project_id
    }

    fn deleted_at(&self) -> Option<Timestamp> {
        self.audit.deleted_at
    }

    fn validate_create(input: &CreateContact) -> Result<(), CoreError> {
        validate_create_contact(input)
    }

    fn validate_update(input: &UpdateContact) -> Result<(), CoreError> {
        validate_update_contact(input)
    }
}
