//! Customer entity model and DTOs.

use kennel_core::entity_kind::EntityKind;
use kennel_core::error::CoreError;
use kennel_core::types::{DbId, Timestamp};
use kennel_core::validation::{
    validate_optional_email, validate_optional_object, validate_optional_text,
    validate_required_text, MAX_NAME_LENGTH,
};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::entity::{Entity, SortKey};
use crate::models::audit::AuditFields;

/// Maximum length of a phone number as entered by the user.
pub const MAX_PHONE_LENGTH: usize = 40;

/// A row from the `customers` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: DbId,
    pub project_id: DbId,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub metadata: Option<serde_json::Value>,
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub audit: AuditFields,
}

/// DTO for creating a new customer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCustomer {
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub metadata: Option<serde_json::Value>,
}

/// DTO for updating an existing customer. All fields are optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCustomer {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub metadata: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerFilter {
    pub email: Option<String>,
    pub last_name: Option<String>,
}

pub fn validate_create_customer(input: &CreateCustomer) -> Result<(), CoreError> {
    validate_required_text("firstName", &input.first_name, MAX_NAME_LENGTH)?;
    validate_required_text("lastName", &input.last_name, MAX_NAME_LENGTH)?;
    validate_optional_email("email", input.email.as_deref())?;
    validate_optional_text("phone", input.phone.as_deref(), MAX_PHONE_LENGTH)?;
    validate_optional_object("metadata", input.metadata.as_ref())
}

pub fn validate_update_customer(input: &UpdateCustomer) -> Result<(), CoreError> {
    validate_optional_text("firstName", input.first_name.as_deref(), MAX_NAME_LENGTH)?;
    validate_optional_text("lastName", input.last_name.as_deref(), MAX_NAME_LENGTH)?;
    validate_optional_email("email", input.email.as_deref())?;
    validate_optional_text("phone", input.phone.as_deref(), MAX_PHONE_LENGTH)?;
    validate_optional_object("metadata", input.metadata.as_ref())
}

impl Entity for Customer {
    const KIND: EntityKind = EntityKind::Customer;
    const SORT_KEY: SortKey = SortKey::CreatedAt;

    type Create = CreateCustomer;
    type Update = UpdateCustomer;
    type Filter = CustomerFilter;

    fn id(&self) -> DbId {
        self.id
    }

    fn project_id(&self) -> DbId {
        self.project_id
    }

    fn deleted_at(&self) -> Option<Timestamp> {
        self.audit.deleted_at
    }

    fn validate_create(input: &CreateCustomer) -> Result<(), CoreError> {
        validate_create_customer(input)
    }

    fn validate_update(input: &UpdateCustomer) -> Result<(), CoreError> {
        validate_update_customer(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create() -> CreateCustomer {
        CreateCustomer {
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email: Some("ada@example.com".into()),
            phone: None,
            metadata: None,
        }
    }

    #[test]
    fn valid_customer_passes() {
        assert!(validate_create_customer(&create()).is_ok());
    }

    #[test]
    fn malformed_email_fails() {
        let mut input = create();
        input.email = Some("not-an-email".into());
        assert!(validate_create_customer(&input).is_err());
    }

    #[test]
    fn blank_last_name_in_update_fails() {
        let update = UpdateCustomer {
            last_name: Some("".into()),
            ..Default::default()
        };
        assert!(validate_update_customer(&update).is_err());
    }
}
