//! Startup wiring shared by the server and provisioning binaries.

use std::sync::Arc;
use std::time::Duration;

use kennel_cache::{CacheError, RecordCache};
use kennel_core::actor::Actor;
use kennel_core::api_keys::generate_api_key;
use kennel_core::types::DbId;
use kennel_db::models::api_key::ApiKey;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{CacheBackendKind, ConfigError, LogFormat, SearchProviderKind, ServerConfig};
use crate::search::{PgSearch, SearchProvider};
use crate::services::{Services, StorageBackend};

/// Default `EnvFilter` directives when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "kennel_api=debug,kennel_events=debug,tower_http=debug";

#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error(transparent)]
    Cache(#[from] CacheError),

    #[error("{0}")]
    Unsupported(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Install the global tracing subscriber.
pub fn init_tracing(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).init(),
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
    }
}

/// Connect to Postgres, verify it and apply migrations, or fall back to
/// in-memory storage when no `DATABASE_URL` is configured.
pub async fn open_storage(config: &ServerConfig) -> Result<StorageBackend, StartupError> {
    let Some(url) = config.database_url.as_deref() else {
        tracing::warn!("DATABASE_URL not set, records are kept in memory and lost on exit");
        return Ok(StorageBackend::Memory);
    };

    let pool = kennel_db::create_pool(url, config.database_max_connections).await?;
    tracing::info!("Database connection pool created");

    kennel_db::health_check(&pool).await?;
    tracing::info!("Database health check passed");

    kennel_db::run_migrations(&pool).await?;
    tracing::info!("Database migrations applied");

    Ok(StorageBackend::Postgres(pool))
}

pub async fn build_cache(config: &ServerConfig) -> Result<RecordCache, StartupError> {
    let ttl = config.cache_ttl();
    let cache = match config.cache_backend {
        CacheBackendKind::Memory => RecordCache::in_memory(ttl),
        CacheBackendKind::Redis => connect_redis(&config.redis_url, ttl).await?,
    };
    tracing::info!(backend = cache.backend_name(), ttl_secs = config.cache_ttl_secs, "Cache ready");
    Ok(cache)
}

#[cfg(feature = "redis")]
async fn connect_redis(url: &str, ttl: Option<Duration>) -> Result<RecordCache, StartupError> {
    let backend = kennel_cache::backend::RedisBackend::connect(url).await?;
    Ok(RecordCache::new(Arc::new(backend), ttl))
}

#[cfg(not(feature = "redis"))]
async fn connect_redis(_url: &str, _ttl: Option<Duration>) -> Result<RecordCache, StartupError> {
    Err(StartupError::Unsupported(
        "CACHE_BACKEND=redis requires building with the `redis` feature".into(),
    ))
}

/// The configured search provider, if any. Postgres search needs Postgres
/// storage.
pub fn build_search(
    config: &ServerConfig,
    storage: &StorageBackend,
) -> Result<Option<Arc<dyn SearchProvider>>, StartupError> {
    match (config.search_provider, storage) {
        (None, _) => Ok(None),
        (Some(SearchProviderKind::Postgres), StorageBackend::Postgres(pool)) => {
            Ok(Some(Arc::new(PgSearch::new(pool.clone()))))
        }
        (Some(SearchProviderKind::Postgres), StorageBackend::Memory) => Err(
            StartupError::Unsupported("SEARCH_PROVIDER=postgres requires DATABASE_URL".into()),
        ),
    }
}

/// A freshly provisioned key; `plaintext` exists nowhere else.
pub struct ProvisionedKey {
    pub key: ApiKey,
    pub plaintext: String,
}

/// Create an API key for `project_id` through the services' key store.
pub async fn provision_api_key(
    services: &Services,
    project_id: DbId,
    actor: &Actor,
) -> Result<ProvisionedKey, sqlx::Error> {
    let generated = generate_api_key(&services.api_key_pepper);
    let key = services
        .api_keys
        .create(project_id, &generated.hash, &generated.last4, actor)
        .await?;
    Ok(ProvisionedKey {
        key,
        plaintext: generated.plaintext,
    })
}

/// In-memory mode has no provisioning binary to run against, so the server
/// creates one development key for a fresh project and logs it.
pub async fn provision_dev_key(services: &Services) -> Result<ProvisionedKey, sqlx::Error> {
    let project_id = DbId::now_v7();
    let actor = Actor::service("kennel-api", Some("dev-key"));
    let provisioned = provision_api_key(services, project_id, &actor).await?;
    tracing::warn!(
        project_id = %project_id,
        api_key_id = %provisioned.key.id,
        api_key = %provisioned.plaintext,
        "Provisioned development API key (in-memory storage only)"
    );
    Ok(provisioned)
}
