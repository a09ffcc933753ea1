//! # Sentiment API
//!
//! A small rate-limited HTTP service that labels short texts as positive,
//! negative, or neutral.
//!
//! ## Architecture
//!
//! The crate is split into layers:
//!
//! - **Domain Layer** ([`domain`]) - Sentiment labels, rate limit policy, collaborator traits
//! - **Application Layer** ([`application`]) - Classification service
//! - **Infrastructure Layer** ([`infrastructure`]) - Lexicon classifier, Redis and in-memory limiters
//! - **API Layer** ([`api`]) - Handlers, DTOs, and middleware
//!
//! ## Endpoints
//!
//! - `POST /sentiment` with `{"text": "..."}` returns `{"sentiment": "positive" | "negative" | "neutral"}`
//! - `GET /health` reports the rate limit store status
//!
//! Per-client limits default to 1000/day and 100/hour across all routes, plus
//! 10/hour on `/sentiment`.
//!
//! ## Quick Start
//!
//! ```bash
//! export REDIS_URL="redis://localhost:6379"  # Optional, shares counters between instances
//! cargo run
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::SentimentService;
    pub use crate::domain::classifier::{ClassifierError, SentimentClassifier};
    pub use crate::domain::limiter::{RateLimitError, RateLimiter};
    pub use crate::domain::rate_limit::{RateLimit, RateLimitPolicy, RateWindow};
    pub use crate::domain::sentiment::SentimentLabel;
    pub use crate::error::AppError;
    pub use crate::infrastructure::classifier::LexiconClassifier;
    pub use crate::infrastructure::rate_limit::{InMemoryRateLimiter, RedisRateLimiter};
    pub use crate::state::AppState;
}
