//! Record cache for the kennel platform.
//!
//! - [`key`]: deterministic cache key and event entity-id derivation.
//! - [`backend`]: the [`CacheBackend`] byte store with an in-memory
//!   (dashmap) implementation and a Redis implementation behind the
//!   `redis` feature.
//! - [`RecordCache`]: typed, JSON-serialized, fail-open accessor used by
//!   the services.

pub mod backend;
pub mod error;
pub mod key;
pub mod record;

pub use backend::{CacheBackend, InMemoryBackend};
pub use error::CacheError;
pub use record::RecordCache;
