use std::sync::Arc;

use crate::config::ServerConfig;
use crate::services::Services;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub services: Arc<Services>,
}

impl AppState {
    pub fn new(config: ServerConfig, services: Services) -> Self {
        Self {
            config: Arc::new(config),
            services: Arc::new(services),
        }
    }
}
