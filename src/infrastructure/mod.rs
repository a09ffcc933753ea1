//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer.
//!
//! # Modules
//!
//! - [`classifier`] - Sentiment classifier backends
//! - [`rate_limit`] - Rate limiter backends (Redis and in-memory)

pub mod classifier;
pub mod rate_limit;
