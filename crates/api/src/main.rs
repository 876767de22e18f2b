use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use kennel_api::bootstrap::{self, StartupError};
use kennel_api::config::{LogFormat, ServerConfig};
use kennel_api::router::build_app_router;
use kennel_api::services::{Services, StorageBackend};
use kennel_api::state::AppState;
use kennel_events::{EventBus, EventLogger, EventPersistence, EventPublisher};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Configuration & tracing ---
    let config = ServerConfig::from_env();
    bootstrap::init_tracing(
        config
            .as_ref()
            .map(|c| c.log_format)
            .unwrap_or(LogFormat::Text),
    );

    let config = match config {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "Invalid configuration");
            std::process::exit(1);
        }
    };
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    if let Err(e) = run(config).await {
        tracing::error!(error = %e, "Server failed");
        std::process::exit(1);
    }
}

async fn run(config: ServerConfig) -> Result<(), StartupError> {
    // --- Storage, cache, search ---
    let storage = bootstrap::open_storage(&config).await?;
    let cache = bootstrap::build_cache(&config).await?;
    let search = bootstrap::build_search(&config, &storage)?;

    // --- Event bus ---
    let event_bus = Arc::new(EventBus::default());

    let persistence_handle = match &storage {
        StorageBackend::Postgres(pool) => Some(tokio::spawn(EventPersistence::run(
            pool.clone(),
            event_bus.subscribe(),
        ))),
        StorageBackend::Memory => None,
    };
    let logger_handle = tokio::spawn(EventLogger::run(event_bus.subscribe_to("**")));
    tracing::info!(
        persistence = persistence_handle.is_some(),
        "Event services started"
    );

    // --- Services ---
    let publisher: Arc<dyn EventPublisher> = event_bus.clone();
    let services = Services::new(
        storage,
        cache,
        publisher,
        search,
        config.api_key_pepper.clone(),
    );

    if matches!(services.storage, StorageBackend::Memory) {
        bootstrap::provision_dev_key(&services).await?;
    }

    // --- Router ---
    let addr = SocketAddr::new(
        config
            .host
            .parse()
            .map_err(|e| StartupError::Unsupported(format!("Invalid HOST address: {e}")))?,
        config.port,
    );
    let state = AppState::new(config, services);
    let app = build_app_router(state);

    // --- Start server ---
    tracing::info!(%addr, "Starting server");
    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, cleaning up");

    // The router (and with it every service holding a publisher) is gone;
    // dropping the last bus handle closes the channel for the subscribers.
    drop(event_bus);
    if let Some(handle) = persistence_handle {
        let _ = tokio::time::timeout(Duration::from_secs(5), handle).await;
    }
    let _ = tokio::time::timeout(Duration::from_secs(5), logger_handle).await;
    tracing::info!("Graceful shutdown complete");

    Ok(())
}

/// Wait for SIGINT or (on Unix) SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl-C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
