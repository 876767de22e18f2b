//! Repository layer.
//!
//! Tenant entity tables implement [`crate::store::PgEntity`] here, one file
//! per table. The remaining tables get a zero-sized repository struct
//! providing async methods that accept `&PgPool` as the first argument.

mod animal_relationship_repo;
mod animal_repo;
mod contact_repo;
mod customer_repo;
mod document_repo;
mod facility_repo;
mod group_association_repo;
mod group_repo;
mod resource_repo;
mod resource_type_repo;
mod service_repo;
mod stock_ledger_repo;

pub mod api_key_repo;
pub mod event_repo;
pub mod project_repo;
pub mod search_repo;
pub mod translation_repo;

pub use api_key_repo::ApiKeyRepo;
pub use event_repo::{EventRepo, NewDomainEvent};
pub use project_repo::ProjectRepo;
pub use search_repo::SearchRepo;
pub use translation_repo::TranslationRepo;
