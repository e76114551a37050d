//! Feed Cache - A caching reverse-proxy for a single upstream feed
//!
//! Serves the cached feed immediately and refreshes it from the upstream in
//! the background once it turns stale.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::signal;
use tokio::task::JoinHandle;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use feed_cache::api::{create_router, AppState};
use feed_cache::cache::{CacheSettings, StaleWhileRevalidateCache};
use feed_cache::config::{Config, StoreBackend};
use feed_cache::fetcher::HttpFetcher;
use feed_cache::store::{MemoryStore, RedisStore, Store};
use feed_cache::tasks::spawn_cleanup_task;

/// Main entry point for the feed cache server.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load and validate configuration from environment variables
/// 3. Open the store once (Redis connection or in-memory map)
/// 4. Build the upstream fetcher and the cache
/// 5. Create Axum router with all endpoints
/// 6. Start HTTP server on configured port
/// 7. Handle graceful shutdown on SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "feed_cache=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Feed Cache Server");

    let config = Config::from_env()?;
    config.validate()?;
    info!(
        "Configuration loaded: backend={:?}, key={}, freshness_window={}s, store_ttl={}s, port={}",
        config.store_backend,
        config.cache_key,
        config.freshness_window,
        config.store_ttl,
        config.server_port
    );

    let (store, cleanup_handle) = open_store(&config).await?;

    let fetcher = HttpFetcher::new(config.upstream_url.clone(), config.fetch_timeout())?;
    info!("Upstream: {}", fetcher.url());

    let cache = StaleWhileRevalidateCache::new(
        store,
        Arc::new(fetcher),
        CacheSettings::from(&config),
    )?;

    let app = create_router(AppState::new(cache));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Server running on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(cleanup_handle))
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Opens the configured store; the memory backend also gets a cleanup task.
async fn open_store(config: &Config) -> anyhow::Result<(Arc<dyn Store>, Option<JoinHandle<()>>)> {
    match config.store_backend {
        StoreBackend::Redis => {
            let store: Arc<dyn Store> = Arc::new(RedisStore::connect(&config.redis_url).await?);
            Ok((store, None))
        }
        StoreBackend::Memory => {
            let store = Arc::new(MemoryStore::new());
            let handle = spawn_cleanup_task(store.clone(), config.cleanup_interval);
            info!("In-memory store initialized with background cleanup");
            Ok((store as Arc<dyn Store>, Some(handle)))
        }
    }
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// On shutdown signal, aborts the cleanup task and allows graceful shutdown.
async fn shutdown_signal(cleanup_handle: Option<JoinHandle<()>>) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }

    if let Some(handle) = cleanup_handle {
        handle.abort();
        warn!("Cleanup task aborted");
    }
}
