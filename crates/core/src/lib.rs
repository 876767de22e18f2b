//! Domain primitives shared by every Kennel crate.
//!
//! This crate has zero internal dependencies so it can be used by the
//! repository layer, the cache and event crates, the API server and any
//! provisioning tooling alike.

pub mod actor;
pub mod api_keys;
pub mod entity_kind;
pub mod error;
pub mod pagination;
pub mod types;
pub mod validation;
