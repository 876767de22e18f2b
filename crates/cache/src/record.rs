//! Typed, fail-open record cache.
//!
//! Values are JSON-serialized records. Caching is best effort: any backend
//! or decode failure is logged at `warn` and the call behaves as a miss (for
//! `get`) or a no-op (for `set`/`delete`). Persistence stays authoritative.

use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::backend::{CacheBackend, InMemoryBackend};

#[derive(Clone)]
pub struct RecordCache {
    backend: Arc<dyn CacheBackend>,
    ttl: Option<Duration>,
}

impl RecordCache {
    /// `ttl = None` stores entries without expiry.
    pub fn new(backend: Arc<dyn CacheBackend>, ttl: Option<Duration>) -> Self {
        Self { backend, ttl }
    }

    /// A cache over a fresh [`InMemoryBackend`].
    pub fn in_memory(ttl: Option<Duration>) -> Self {
        Self::new(Arc::new(InMemoryBackend::new()), ttl)
    }

    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let bytes = match self.backend.get(key).await {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(error = %e, key, "Cache get failed, treating as miss");
                return None;
            }
        };
        match serde_json::from_slice(&bytes) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(error = %e, key, "Cached value could not be decoded, treating as miss");
                None
            }
        }
    }

    pub async fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) {
        let bytes = match serde_json::to_vec(value) {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!(error = %e, key, "Failed to serialize value for cache");
                return;
            }
        };
        if let Err(e) = self.backend.set(key, bytes, self.ttl).await {
            tracing::warn!(error = %e, key, "Cache set failed");
        }
    }

    pub async fn delete(&self, key: &str) {
        if let Err(e) = self.backend.delete(key).await {
            tracing::warn!(error = %e, key, "Cache delete failed");
        }
    }

    /// `true` when the backend answers its health check.
    pub async fn is_healthy(&self) -> bool {
        match self.backend.health_check().await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(error = %e, backend = self.backend.name(), "Cache health check failed");
                false
            }
        }
    }
}
