use axum::http::HeaderValue;

/// Which cache backend to build at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheBackendKind {
    Memory,
    Redis,
}

/// Optional search collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchProviderKind {
    Postgres,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} has invalid value '{value}': {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development; without
/// `DATABASE_URL` the server runs on in-memory storage.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    pub request_timeout_secs: u64,
    pub database_url: Option<String>,
    pub database_max_connections: u32,
    pub cache_backend: CacheBackendKind,
    pub redis_url: String,
    /// `0` disables expiry.
    pub cache_ttl_secs: u64,
    pub search_provider: Option<SearchProviderKind>,
    /// HMAC key for API key secrets.
    pub api_key_pepper: String,
    pub log_format: LogFormat,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                    | Default                    |
    /// |----------------------------|----------------------------|
    /// | `HOST`                     | `0.0.0.0`                  |
    /// | `PORT`                     | `3000`                     |
    /// | `CORS_ORIGINS`             | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS`     | `30`                       |
    /// | `DATABASE_URL`             | unset (in-memory storage)  |
    /// | `DATABASE_MAX_CONNECTIONS` | `20`                       |
    /// | `CACHE_BACKEND`            | `memory`                   |
    /// | `REDIS_URL`                | `redis://127.0.0.1:6379`   |
    /// | `CACHE_TTL_SECS`           | `300`                      |
    /// | `SEARCH_PROVIDER`          | unset (search disabled)    |
    /// | `API_KEY_PEPPER`           | empty                      |
    /// | `LOG_FORMAT`               | `text`                     |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |name: &str, default: &str| {
            lookup(name)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let host = var("HOST", "0.0.0.0");
        let port = parse("PORT", var("PORT", "3000"))?;

        let cors_origins: Vec<String> = var("CORS_ORIGINS", "http://localhost:5173")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        for origin in &cors_origins {
            if let Err(e) = origin.parse::<HeaderValue>() {
                return Err(invalid("CORS_ORIGINS", origin, e));
            }
        }

        let request_timeout_secs = parse("REQUEST_TIMEOUT_SECS", var("REQUEST_TIMEOUT_SECS", "30"))?;

        let database_url = lookup("DATABASE_URL").filter(|v| !v.trim().is_empty());
        let database_max_connections = parse(
            "DATABASE_MAX_CONNECTIONS",
            var("DATABASE_MAX_CONNECTIONS", "20"),
        )?;

        let cache_backend = match var("CACHE_BACKEND", "memory").to_ascii_lowercase().as_str() {
            "memory" => CacheBackendKind::Memory,
            "redis" => CacheBackendKind::Redis,
            other => return Err(invalid("CACHE_BACKEND", other, "expected memory or redis")),
        };
        let redis_url = var("REDIS_URL", "redis://127.0.0.1:6379");
        let cache_ttl_secs = parse("CACHE_TTL_SECS", var("CACHE_TTL_SECS", "300"))?;

        let search_provider = match lookup("SEARCH_PROVIDER")
            .map(|v| v.trim().to_ascii_lowercase())
            .filter(|v| !v.is_empty())
        {
            None => None,
            Some(v) if v == "postgres" => Some(SearchProviderKind::Postgres),
            Some(other) => return Err(invalid("SEARCH_PROVIDER", &other, "expected postgres")),
        };

        let api_key_pepper = lookup("API_KEY_PEPPER").unwrap_or_default();

        let log_format = match var("LOG_FORMAT", "text").to_ascii_lowercase().as_str() {
            "text" => LogFormat::Text,
            "json" => LogFormat::Json,
            other => return Err(invalid("LOG_FORMAT", other, "expected text or json")),
        };

        Ok(Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            database_url,
            database_max_connections,
            cache_backend,
            redis_url,
            cache_ttl_secs,
            search_provider,
            api_key_pepper,
            log_format,
        })
    }

    /// Cache entry lifetime; `None` when `CACHE_TTL_SECS=0`.
    pub fn cache_ttl(&self) -> Option<std::time::Duration> {
        (self.cache_ttl_secs > 0).then(|| std::time::Duration::from_secs(self.cache_ttl_secs))
    }
}

fn parse<T>(name: &'static str, value: String) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e| invalid(name, &value, e))
}

fn invalid(var: &'static str, value: &str, reason: impl std::fmt::Display) -> ConfigError {
    ConfigError::Invalid {
        var,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use assert_matches::assert_matches;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|name| map.get(name).cloned())
    }

    #[test]
    fn defaults_select_in_memory_storage() {
        let config = load(&[]).unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3000);
        assert_eq!(config.cors_origins, vec!["http://localhost:5173"]);
        assert!(config.database_url.is_none());
        assert_eq!(config.database_max_connections, 20);
        assert_eq!(config.cache_backend, CacheBackendKind::Memory);
        assert_eq!(config.cache_ttl(), Some(std::time::Duration::from_secs(300)));
        assert!(config.search_provider.is_none());
        assert_eq!(config.log_format, LogFormat::Text);
    }

    #[test]
    fn overrides_are_parsed() {
        let config = load(&[
            ("PORT", "8080"),
            ("CORS_ORIGINS", "http://a.test, http://b.test"),
            ("DATABASE_URL", "postgres://localhost/kennel"),
            ("CACHE_TTL_SECS", "0"),
            ("SEARCH_PROVIDER", "Postgres"),
            ("LOG_FORMAT", "json"),
        ])
        .unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.cors_origins, vec!["http://a.test", "http://b.test"]);
        assert_eq!(config.database_url.as_deref(), Some("postgres://localhost/kennel"));
        assert_eq!(config.cache_ttl(), None);
        assert_eq!(config.search_provider, Some(SearchProviderKind::Postgres));
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert_matches!(load(&[("PORT", "http")]), Err(ConfigError::Invalid { var: "PORT", .. }));
        assert_matches!(
            load(&[("CACHE_BACKEND", "memcached")]),
            Err(ConfigError::Invalid { var: "CACHE_BACKEND", .. })
        );
        assert_matches!(
            load(&[("SEARCH_PROVIDER", "elastic")]),
            Err(ConfigError::Invalid { var: "SEARCH_PROVIDER", .. })
        );
    }
}
