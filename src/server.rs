//! HTTP server initialization and runtime setup.
//!
//! Handles rate limit store setup, classifier wiring, and the Axum server lifecycle.

use crate::application::services::SentimentService;
use crate::config::Config;
use crate::domain::limiter::RateLimiter;
use crate::infrastructure::classifier::LexiconClassifier;
use crate::infrastructure::rate_limit::{InMemoryRateLimiter, RedisRateLimiter};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::sync::Arc;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Rate limit store (Redis, or in-memory fallback)
/// - Sentiment classifier
/// - Axum HTTP server with graceful shutdown
///
/// # Errors
///
/// Returns an error if:
/// - A rate limit expression is invalid
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let policy = config.rate_limit_policy()?;
    let rate_limiter = connect_rate_limiter(&config).await;

    let classifier = Arc::new(LexiconClassifier::new());
    let sentiment_service = Arc::new(SentimentService::new(classifier));

    let state = AppState::new(sentiment_service, rate_limiter, policy, config.behind_proxy);

    let app = app_router(state);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid listen address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");

    Ok(())
}

/// Picks the rate limit backend.
///
/// Redis when configured and reachable; otherwise counters stay in this
/// process, which is only correct for a single instance.
async fn connect_rate_limiter(config: &Config) -> Arc<dyn RateLimiter> {
    let Some(redis_url) = &config.redis_url else {
        tracing::info!("Rate limiting in memory (Redis not configured)");
        return Arc::new(InMemoryRateLimiter::new());
    };

    match RedisRateLimiter::connect(redis_url, config.rate_limit_key_prefix.clone()).await {
        Ok(redis) => {
            tracing::info!("Rate limiting through Redis");
            Arc::new(redis)
        }
        Err(e) => {
            tracing::warn!(
                "Failed to connect to Redis: {}. Rate limiting in memory.",
                e
            );
            Arc::new(InMemoryRateLimiter::new())
        }
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
