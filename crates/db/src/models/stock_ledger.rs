//! Inventory stock ledger entries.
//!
//! Each row is a signed quantity movement for a SKU at a facility. Positive
//! quantities are receipts, negative quantities are consumption.

use kennel_core::entity_kind::EntityKind;
use kennel_core::error::CoreError;
use kennel_core::types::{DbId, Timestamp};
use kennel_core::validation::{
    validate_non_zero, validate_optional_text, validate_required_text, MAX_DESCRIPTION_LENGTH,
    MAX_NAME_LENGTH,
};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::entity::{Entity, SortKey};
use crate::models::audit::AuditFields;

#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockLedger {
    pub id: DbId,
    pub project_id: DbId,
    pub sku: String,
    pub facility_id: Option<DbId>,
    pub quantity: i32,
    pub reason: Option<String>,
    /// External reference such as an order or invoice number.
    pub reference: Option<String>,
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub audit: AuditFields,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateStockLedger {
    pub sku: String,
    pub facility_id: Option<DbId>,
    pub quantity: i32,
    pub reason: Option<String>,
    pub reference: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStockLedger {
    pub quantity: Option<i32>,
    pub reason: Option<String>,
    pub reference: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockLedgerFilter {
    pub sku: Option<String>,
    pub facility_id: Option<DbId>,
}

impl Entity for StockLedger {
    const KIND: EntityKind = EntityKind::StockLedger;
    const SORT_KEY: SortKey = SortKey::CreatedAt;

    type Create = CreateStockLedger;
    type Update = UpdateStockLedger;
    type Filter = StockLedgerFilter;

    fn id(&self) -> DbId {
        self.id
    }

    fn project_id(&self) -> DbId {
        self.project_id
    }

    fn deleted_at(&self) -> Option<Timestamp> {
        self.audit.deleted_at
    }

    fn validate_create(input: &CreateStockLedger) -> Result<(), CoreError> {
        validate_required_text("sku", &input.sku, MAX_NAME_LENGTH)?;
        validate_non_zero("quantity", Some(i64::from(input.quantity)))?;
        validate_optional_text("reason", input.reason.as_deref(), MAX_DESCRIPTION_LENGTH)?;
        validate_optional_text("reference", input.reference.as_deref(), MAX_NAME_LENGTH)
    }

    fn validate_update(input: &UpdateStockLedger) -> Result<(), CoreError> {
        validate_non_zero("quantity", input.quantity.map(i64::from))?;
        validate_optional_text("reason", input.reason.as_deref(), MAX_DESCRIPTION_LENGTH)?;
        validate_optional_text("reference", input.reference.as_deref(), MAX_NAME_LENGTH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_quantity_is_rejected() {
        let input = CreateStockLedger {
            sku: "FOOD-1KG".into(),
            facility_id: None,
            quantity: 0,
            reason: None,
            reference: None,
        };
        assert!(StockLedger::validate_create(&input).is_err());
    }

    #[test]
    fn negative_quantity_is_consumption() {
        let input = CreateStockLedger {
            sku: "FOOD-1KG".into(),
            facility_id: None,
            quantity: -3,
            reason: Some("feeding".into()),
            reference: None,
        };
        assert!(StockLedger::validate_create(&input).is_ok());
    }
}
