//! Shared application state for Axum handlers.

use std::sync::Arc;

use crate::application::services::SentimentService;
use crate::domain::limiter::RateLimiter;
use crate::domain::rate_limit::RateLimitPolicy;

/// Application state injected into every handler and middleware.
///
/// Cheap to clone; all members are reference-counted.
#[derive(Clone)]
pub struct AppState {
    pub sentiment_service: Arc<SentimentService>,
    pub rate_limiter: Arc<dyn RateLimiter>,
    pub rate_limit_policy: Arc<RateLimitPolicy>,
    /// When true, the client key is read from `X-Forwarded-For` / `X-Real-IP`.
    pub behind_proxy: bool,
}

impl AppState {
    pub fn new(
        sentiment_service: Arc<SentimentService>,
        rate_limiter: Arc<dyn RateLimiter>,
        rate_limit_policy: RateLimitPolicy,
        behind_proxy: bool,
    ) -> Self {
        Self {
            sentiment_service,
            rate_limiter,
            rate_limit_policy: Arc::new(rate_limit_policy),
            behind_proxy,
        }
    }
}
