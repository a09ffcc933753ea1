//! API route configuration.
//!
//! Every route is rate limited through [`crate::api::middleware::rate_limit`].

use crate::api::handlers::{
    health_handler, method_not_allowed_handler, not_found_handler, sentiment_handler,
};
use crate::api::middleware::rate_limit;
use crate::state::AppState;
use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
};

/// Path of the sentiment endpoint; also the scope of its route-specific limits.
pub const SENTIMENT_PATH: &str = "/sentiment";

/// Path of the health endpoint.
pub const HEALTH_PATH: &str = "/health";

/// All API routes with rate limiting applied.
///
/// # Endpoints
///
/// - `POST /sentiment` - Classify a short text
/// - `GET  /health`    - Rate limit store status
///
/// Unknown paths and unsupported methods get JSON 404 / 405 bodies.
pub fn rate_limited_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            SENTIMENT_PATH,
            post(sentiment_handler).layer(DefaultBodyLimit::disable()),
        )
        .route(HEALTH_PATH, get(health_handler))
        .route_layer(middleware::from_fn_with_state(state, rate_limit::layer))
        .fallback(not_found_handler)
        .method_not_allowed_fallback(method_not_allowed_handler)
}
