//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` + `Deserialize` entity struct matching the row
//! - A create DTO for inserts
//! - An update DTO (all `Option` fields) for patches
//! - A filter DTO for list queries
//! - Standalone validation functions for the create and update DTOs

pub mod animal;
pub mod animal_relationship;
pub mod api_key;
pub mod audit;
pub mod contact;
pub mod customer;
pub mod document;
pub mod facility;
pub mod group;
pub mod group_association;
pub mod project;
pub mod resource;
pub mod resource_type;
pub mod service;
pub mod stock_ledger;
pub mod translation;

pub use audit::AuditFields;
