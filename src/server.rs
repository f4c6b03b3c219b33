//! HTTP server initialization and runtime setup.
//!
//! Opens storage and cache, builds the shared state, serves until a shutdown
//! signal, then closes storage.

use crate::api::middleware::rate_limit::{RateGate, RateLimitScope};
use crate::application::services::TokenService;
use crate::config::Config;
use crate::infrastructure::Storage;
use crate::infrastructure::cache::{CacheService, NullCache, RedisCache};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// How often idle per-client rate buckets are swept.
const RATE_BUCKET_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Storage (PostgreSQL with migrations, or in-memory)
/// - Redis cache (or NullCache fallback)
/// - Rate gate (and its eviction task in `client` scope)
/// - Axum HTTP server with graceful shutdown
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let storage = Arc::new(Storage::connect(&config).await?);
    tracing::info!("Storage backend: {}", storage.backend_name());

    let cache: Arc<dyn CacheService> = if let Some(redis_url) = &config.redis_url {
        match RedisCache::connect(redis_url, config.cache_ttl_seconds).await {
            Ok(redis) => {
                tracing::info!("Cache enabled (Redis)");
                Arc::new(redis)
            }
            Err(e) => {
                tracing::warn!("Failed to connect to Redis: {}. Using NullCache.", e);
                Arc::new(NullCache::new())
            }
        }
    } else {
        tracing::info!("Cache disabled (NullCache)");
        Arc::new(NullCache::new())
    };

    let tokens = Arc::new(TokenService::new(
        &config.token_signing_secret,
        chrono::Duration::hours(config.token_ttl_hours),
    ));

    let rate_gate = Arc::new(
        RateGate::with_limits(
            config.rate_limit_per_second,
            config.rate_limit_burst,
            config.rate_limit_scope,
        )
        .behind_proxy(config.behind_proxy),
    );

    if config.rate_limit_scope == RateLimitScope::Client {
        tokio::spawn(sweep_rate_buckets(rate_gate.clone()));
    }

    let state = AppState::new(storage.clone(), tokens, rate_gate, cache);
    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped, closing storage");
    storage.close().await;

    Ok(())
}

async fn sweep_rate_buckets(gate: Arc<RateGate>) {
    let mut ticker = tokio::time::interval(RATE_BUCKET_SWEEP_INTERVAL);
    loop {
        ticker.tick().await;
        gate.retain_recent();
        tracing::debug!(clients = gate.tracked_clients(), "Swept idle rate buckets");
    }
}

/// Resolves on Ctrl-C or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
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
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
