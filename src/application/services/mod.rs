//! Business logic services for the application layer.

pub mod sentiment_service;

pub use sentiment_service::SentimentService;
