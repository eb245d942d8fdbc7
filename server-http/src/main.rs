mod api;
mod handlers;
mod routes;
mod state;

use cinder::events::CacheEvent;
use cinder::service::CacheAccessService;
use cinder::KeyValueStore;
use shared::config::RuntimeConfig;
use shared::TtlSeconds;
use state::AppState;
use std::sync::Arc;
use storage_redis::RedisStore;
use tokio::sync::broadcast;
use tracing::{error, info, warn, Level};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    info!("Starting cache server...");

    // Load environment variables from .env file (if exists)
    match dotenvy::dotenv() {
        Ok(_) => info!("Loaded environment variables from .env file"),
        Err(_) => info!("No .env file found, using system environment variables"),
    }

    // Resolve and validate configuration; never serve with an invalid one.
    let config = match RuntimeConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            error!("invalid configuration: {err}");
            std::process::exit(1);
        }
    };

    // Connect to the backing store and fail fast if it is unreachable.
    let store = match RedisStore::connect(&config).await {
        Ok(store) => store,
        Err(err) => {
            error!(
                "failed to connect to redis at {}:{} - {err}",
                config.redis_host, config.redis_port
            );
            std::process::exit(1);
        }
    };
    if let Err(err) = store.ping().await {
        error!(
            "redis at {}:{} did not answer ping - {err}",
            config.redis_host, config.redis_port
        );
        std::process::exit(1);
    }
    info!(
        "Connected to redis at {}:{}",
        config.redis_host, config.redis_port
    );

    // Event channel for cache observation; the logging observer is the only
    // built-in subscriber.
    let (event_tx, event_rx) = broadcast::channel(1000);
    spawn_event_logger(event_rx);

    let cache_access = Arc::new(CacheAccessService::with_event_broadcaster(
        Arc::new(store),
        TtlSeconds(config.default_ttl_secs),
        event_tx,
    ));

    let state = AppState::new(cache_access);
    let router = routes::build_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.http_port);
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(err) => {
            error!("failed to bind {addr}: {err}");
            std::process::exit(1);
        }
    };

    info!("HTTP Server listening on http://{addr}");
    info!("Try: curl http://localhost:{}/api/health", config.http_port);

    // Graceful shutdown handler
    if let Err(err) = axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("server error: {err}");
        std::process::exit(1);
    }

    info!("Server shutdown complete");
}

fn spawn_event_logger(mut events: broadcast::Receiver<CacheEvent>) {
    tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(event) => {
                    info!(kind = event.kind(), key = event.key(), "cache event");
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(skipped, "event logger lagged, events dropped");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    });
}

async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            info!("Received terminate signal");
        },
    }

    info!("Shutting down gracefully...");
}
