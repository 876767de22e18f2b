//! Cache backend implementations.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::CacheError;

pub mod inmemory;
#[cfg(feature = "redis")]
pub mod redis;

pub use inmemory::InMemoryBackend;
#[cfg(feature = "redis")]
pub use self::redis::RedisBackend;

/// A byte-oriented key-value store with optional per-entry TTL.
///
/// All methods take `&self`; implementations use interior mutability or an
/// external store so one instance can be shared as `Arc<dyn CacheBackend>`.
#[async_trait]
pub trait CacheBackend: Send + Sync {
    /// `Ok(None)` on a miss or an expired entry.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError>;

    /// Store `value` under `key`. `ttl = None` means no expiry.
    async fn set(&self, key: &str, value: Vec<u8>, ttl: Option<Duration>)
        -> Result<(), CacheError>;

    /// Remove `key`. Removing a missing key is not an error.
    async fn delete(&self, key: &str) -> Result<(), CacheError>;

    /// Verify the backend is reachable.
    async fn health_check(&self) -> Result<(), CacheError> {
        Ok(())
    }

    /// Short backend name for logs and the health endpoint.
    fn name(&self) -> &'static str;
}
