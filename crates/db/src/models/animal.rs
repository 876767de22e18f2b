//! Animal entity model and DTOs.

use chrono::NaiveDate;
use kennel_core::entity_kind::EntityKind;
use kennel_core::error::CoreError;
use kennel_core::types::{DbId, Timestamp};
use kennel_core::validation::{
    validate_optional_object, validate_optional_text, validate_required_text, MAX_NAME_LENGTH,
};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::entity::{Entity, SortKey};
use crate::models::audit::AuditFields;

pub const SEX_MALE: &str = "male";
pub const SEX_FEMALE: &str = "female";
pub const SEX_UNKNOWN: &str = "unknown";

/// All accepted values for `sex`.
pub const VALID_SEXES: &[&str] = &[SEX_MALE, SEX_FEMALE, SEX_UNKNOWN];

/// A row from the `animals` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Animal {
    pub id: DbId,
    pub project_id: DbId,
    pub name: String,
    pub species_id: Option<DbId>,
    pub sex: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub metadata: Option<serde_json::Value>,
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub audit: AuditFields,
}

/// DTO for creating a new animal.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAnimal {
    pub name: String,
    pub species_id: Option<DbId>,
    pub sex: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub metadata: Option<serde_json::Value>,
}

/// DTO for updating an existing animal. All fields are optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAnimal {
    pub name: Option<String>,
    pub species_id: Option<DbId>,
    pub sex: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub metadata: Option<serde_json::Value>,
}

/// Equality filters for `GET /animals`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimalFilter {
    pub name: Option<String>,
    pub species_id: Option<DbId>,
    pub sex: Option<String>,
}

fn validate_sex(sex: Option<&str>) -> Result<(), CoreError> {
    match sex {
        Some(s) if !VALID_SEXES.contains(&s) => Err(CoreError::Validation(format!(
            "Invalid sex '{s}'. Valid values: {}",
            VALID_SEXES.join(", ")
        ))),
        _ => Ok(()),
    }
}

fn validate_date_of_birth(date: Option<NaiveDate>) -> Result<(), CoreError> {
    match date {
        Some(d) if d > chrono::Utc::now().date_naive() => Err(CoreError::Validation(
            "dateOfBirth must not be in the future".into(),
        )),
        _ => Ok(()),
    }
}

pub fn validate_create_animal(input: &CreateAnimal) -> Result<(), CoreError> {
    validate_required_text("name", &input.name, MAX_NAME_LENGTH)?;
    validate_sex(input.sex.as_deref())?;
    validate_date_of_birth(input.date_of_birth)?;
    validate_optional_object("metadata", input.metadata.as_ref())
}

pub fn validate_update_animal(input: &UpdateAnimal) -> Result<(), CoreError> {
    validate_optional_text("name", input.name.as_deref(), MAX_NAME_LENGTH)?;
    validate_sex(input.sex.as_deref())?;
    validate_date_of_birth(input.date_of_birth)?;
    validate_optional_object("metadata", input.metadata.as_ref())
}

impl Entity for Animal {
    const KIND: EntityKind = EntityKind::Animal;
    const SORT_KEY: SortKey = SortKey::CreatedAt;

    type Create = CreateAnimal;
    type Update = UpdateAnimal;
    type Filter = AnimalFilter;

    fn id(&self) -> DbId {
        self.id
    }

    fn project_id(&self) -> DbId {
        self.project_id
    }

    fn deleted_at(&self) -> Option<Timestamp> {
        self.audit.deleted_at
    }

    fn validate_create(input: &CreateAnimal) -> Result<(), CoreError> {
        validate_create_animal(input)
    }

    fn validate_update(input: &UpdateAnimal) -> Result<(), CoreError> {
        validate_update_animal(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create(name: &str) -> CreateAnimal {
        CreateAnimal {
            name: name.to_string(),
            species_id: None,
            sex: None,
            date_of_birth: None,
            metadata: None,
        }
    }

    #[test]
    fn valid_animal_passes() {
        let mut input = create("Rex");
        input.sex = Some(SEX_MALE.to_string());
        input.date_of_birth = NaiveDate::from_ymd_opt(2020, 5, 1);
        assert!(validate_create_animal(&input).is_ok());
    }

    #[test]
    fn blank_name_fails() {
        assert!(validate_create_animal(&create(" ")).is_err());
    }

    #[test]
    fn unknown_sex_fails() {
        let update = UpdateAnimal {
            sex: Some("robot".into()),
            ..Default::default()
        };
        let err = validate_update_animal(&update).unwrap_err();
        assert!(err.to_string().contains("Invalid sex"));
    }

    #[test]
    fn future_birth_date_fails() {
        let mut input = create("Rex");
        input.date_of_birth = Some(chrono::Utc::now().date_naive() + chrono::Days::new(3));
        assert!(validate_create_animal(&input).is_err());
    }

    #[test]
    fn empty_update_is_valid() {
        assert!(validate_update_animal(&UpdateAnimal::default()).is_ok());
    }
}
