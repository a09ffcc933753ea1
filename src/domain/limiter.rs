//! Rate limiter interface.

use crate::domain::rate_limit::RateWindow;
use async_trait::async_trait;

/// Errors raised by a rate limiter backend.
#[derive(Debug, thiserror::Error)]
pub enum RateLimitError {
    #[error("Rate limit storage error: {0}")]
    Storage(String),
    #[error("Invalid rate limit window: {0}")]
    InvalidWindow(String),
}

/// Counts requests per client across one or more windows.
///
/// The counter store is owned by the implementation. Callers make exactly
/// one call per request and never coordinate access to the counters.
///
/// # Implementations
///
/// - [`crate::infrastructure::rate_limit::RedisRateLimiter`] - Shared Redis counters
/// - [`crate::infrastructure::rate_limit::InMemoryRateLimiter`] - Process-local fixed-window counters
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RateLimiter: Send + Sync {
    /// Records a hit for `client_key` against every window.
    ///
    /// # Returns
    ///
    /// - `Ok(true)` if every window still had capacity
    /// - `Ok(false)` if at least one window is exhausted
    ///
    /// # Errors
    ///
    /// Returns [`RateLimitError`] if the backing store fails.
    async fn check_and_increment(
        &self,
        client_key: &str,
        windows: &[RateWindow],
    ) -> Result<bool, RateLimitError>;

    /// Checks if the limiter backend is healthy.
    async fn health_check(&self) -> bool;

    /// Short backend name used in logs and health output.
    fn backend(&self) -> &'static str;
}
