//! HTTP request handlers for API endpoints.

pub mod fallback;
pub mod health;
pub mod sentiment;

pub use fallback::{method_not_allowed_handler, not_found_handler};
pub use health::health_handler;
pub use sentiment::sentiment_handler;
