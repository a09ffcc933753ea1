//! Domain layer: core types and collaborator interfaces.
//!
//! # Modules
//!
//! - [`sentiment`] - Sentiment labels and the polarity partition
//! - [`classifier`] - Classifier trait producing polarity scores
//! - [`rate_limit`] - Limit expressions, windows, and per-route policy
//! - [`limiter`] - Rate limiter trait over a shared counter store

pub mod classifier;
pub mod limiter;
pub mod rate_limit;
pub mod sentiment;
