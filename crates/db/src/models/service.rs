//! Sellable service (boarding night, grooming, walk) model and DTOs.

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

/// A row from the `services` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub id: DbId,
    pub project_id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub duration_minutes: Option<i32>,
    /// Price in minor units of `currency`.
    pub price_cents: Option<i64>,
    /// ISO 4217 code, upper case.
    pub currency: Option<String>,
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub audit: AuditFields,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateService {
    pub name: String,
    pub description: Option<String>,
    pub duration_minutes: Option<i32>,
    pub price_cents: Option<i64>,
    pub currency: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateService {
    pub name: Option<String>,
    pub description: Option<String>,
    pub duration_minutes: Option<i32>,
    pub price_cents: Option<i64>,
    pub currency: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceFilter {
    pub name: Option<String>,
    pub currency: Option<String>,
}

fn validate_currency(currency: Option<&str>) -> Result<(), CoreError> {
    match currency {
        Some(c) if c.len() != 3 || !c.chars().all(|ch| ch.is_ascii_uppercase()) => Err(
            CoreError::Validation(format!("currency '{c}' must be a 3-letter ISO 4217 code")),
        ),
        _ => Ok(()),
    }
}

fn validate_amounts(duration: Option<i32>, price: Option<i64>) -> Result<(), CoreError> {
    validate_non_negative("durationMinutes", duration.map(i64::from))?;
    validate_non_negative("priceCents", price)
}

pub fn validate_create_service(input: &CreateService) -> Result<(), CoreError> {
    validate_required_text("name", &input.name, MAX_NAME_LENGTH)?;
    validate_optional_text(
        "description",
        input.description.as_deref(),
        MAX_DESCRIPTION_LENGTH,
    )?;
    validate_amounts(input.duration_minutes, input.price_cents)?;
    validate_currency(input.currency.as_deref())
}

pub fn validate_update_service(input: &UpdateService) -> Result<(), CoreError> {
    validate_optional_text("name", input.name.as_deref(), MAX_NAME_LENGTH)?;
    validate_optional_text(
        "description",
        input.description.as_deref(),
        MAX_DESCRIPTION_LENGTH,
    )?;
    validate_amounts(input.duration_minutes, input.price_cents)?;
    validate_currency(input.currency.as_deref())
}

impl Entity for Service {
    const KIND: EntityKind = EntityKind::Service;
    const SORT_KEY: SortKey = SortKey::Name;

    type Create = CreateService;
    type Update = UpdateService;
    type Filter = ServiceFilter;

    fn id(&self) -> DbId {
        self.id
    }

    fn project_id(&self) -> DbId {
        self.project_id
    }

    fn deleted_at(&self) -> Option<Timestamp> {
        self.audit.deleted_at
    }

    fn validate_create(input: &CreateService) -> Result<(), CoreError> {
        validate_create_service(input)
    }

    fn validate_update(input: &UpdateService) -> Result<(), CoreError> {
        validate_update_service(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create() -> CreateService {
        CreateService {
            name: "Overnight boarding".into(),
            description: None,
            duration_minutes: Some(1440),
            price_cents: Some(4500),
            currency: Some("EUR".into()),
        }
    }

    #[test]
    fn valid_service_passes() {
        assert!(validate_create_service(&create()).is_ok());
    }

    #[test]
    fn lowercase_currency_fails() {
        let mut input = create();
        input.currency = Some("eur".into());
        assert!(validate_create_service(&input).is_err());
    }

    #[test]
    fn negative_price_fails() {
        let update = UpdateService {
            price_cents: Some(-5),
            ..Default::default()
        };
        assert!(validate_update_service(&update).is_err());
    }
}
