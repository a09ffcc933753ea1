//! Application layer services implementing business logic.
//!
//! Services consume domain traits and provide a clean API for HTTP handlers.
//!
//! # Available Services
//!
//! - [`services::sentiment_service::SentimentService`] - Text classification

pub mod services;
