//! Rate limiter backends.
//!
//! Provides two [`crate::domain::limiter::RateLimiter`] implementations:
//! - [`RedisRateLimiter`] - Shared fixed-window counters in Redis
//! - [`InMemoryRateLimiter`] - Process-local fixed-window counters

mod memory_limiter;
mod redis_limiter;

pub use memory_limiter::InMemoryRateLimiter;
pub use redis_limiter::RedisRateLimiter;
