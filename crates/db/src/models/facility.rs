//! Facility (physical location) model and DTOs.

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

pub const MAX_TIMEZONE_LENGTH: usize = 64;

/// A row from the `facilities` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Facility {
    pub id: DbId,
    pub project_id: DbId,
    pub name: String,
    pub address: Option<String>,
    /// IANA zone name, e.g. `Europe/Berlin`.
    pub timezone: Option<String>,
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub audit: AuditFields,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFacility {
    pub name: String,
    pub address: Option<String>,
    pub timezone: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFacility {
    pub name: Option<String>,
    pub address: Option<String>,
    pub timezone: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FacilityFilter {
    pub name: Option<String>,
}

fn validate_timezone(tz: Option<&str>) -> Result<(), CoreError> {
    match tz {
        Some(tz) if tz.trim().is_empty() || tz.len() > MAX_TIMEZONE_LENGTH || tz.contains(' ') => {
            Err(CoreError::Validation(format!("Invalid timezone '{tz}'")))
        }
        _ => Ok(()),
    }
}

pub fn validate_create_facility(input: &CreateFacility) -> Result<(), CoreError> {
    validate_required_text("name", &input.name, MAX_NAME_LENGTH)?;
    validate_optional_text("address", input.address.as_deref(), MAX_DESCRIPTION_LENGTH)?;
    validate_timezone(input.timezone.as_deref())
}

pub fn validate_update_facility(input: &UpdateFacility) -> Result<(), CoreError> {
    validate_optional_text("name", input.name.as_deref(), MAX_NAME_LENGTH)?;
    validate_optional_text("address", input.address.as_deref(), MAX_DESCRIPTION_LENGTH)?;
    validate_timezone(input.timezone.as_deref())
}

impl Entity for Facility {
    const KIND: EntityKind = EntityKind::Facility;
    const SORT_KEY: SortKey = SortKey::Name;

    type Create = CreateFacility;
    type Update = UpdateFacility;
    type Filter = FacilityFilter;

    fn id(&self) -> DbId {
        self.id
    }

    fn project_id(&self) -> DbId {
        self.project_id
    }

    fn deleted_at(&self) -> Option<Timestamp> {
        self.audit.deleted_at
    }

    fn validate_create(input: &CreateFacility) -> Result<(), CoreError> {
        validate_create_facility(input)
    }

    fn validate_update(input: &UpdateFacility) -> Result<(), CoreError> {
        validate_update_facility(input)
    }
}
