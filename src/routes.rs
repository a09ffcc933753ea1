//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `POST /sentiment` - Sentiment classification
//! - `GET  /health`    - Health check
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-client windows, global defaults plus route limits
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::middleware::tracing;
use crate::state::AppState;
use axum::Router;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Builds the router without path normalization.
///
/// Useful for tests that need to add layers (for example a mocked
/// `ConnectInfo`) before the router is wrapped.
pub fn router(state: AppState) -> Router {
    api::routes::rate_limited_routes(state.clone())
        .with_state(state)
        .layer(tracing::layer())
}

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(router(state))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::SentimentService;
    use crate::domain::rate_limit::{RateLimit, RateLimitPolicy};
    use crate::infrastructure::classifier::LexiconClassifier;
    use crate::infrastructure::rate_limit::InMemoryRateLimiter;
    use crate::error::{METHOD_NOT_ALLOWED_MESSAGE, NOT_FOUND_MESSAGE};
    use axum::{
        body::{Body, to_bytes},
        http::{Request, StatusCode},
        response::Response,
    };
    use std::sync::Arc;
    use tower::ServiceExt;

    fn state() -> AppState {
        AppState::new(
            Arc::new(SentimentService::new(Arc::new(LexiconClassifier::new()))),
            Arc::new(InMemoryRateLimiter::new()),
            RateLimitPolicy::new([RateLimit::per_hour(100)]),
            false,
        )
    }

    #[tokio::test]
    async fn test_trailing_slash_is_trimmed() {
        let response = app_router(state())
            .oneshot(
                Request::post("/sentiment/")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"text": "I love this product"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    async fn error_message(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        json["error"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_unknown_route_is_json_not_found() {
        let response = app_router(state())
            .oneshot(Request::get("/analyze").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(error_message(response).await, NOT_FOUND_MESSAGE);
    }

    #[tokio::test]
    async fn test_wrong_method_is_json_method_not_allowed() {
        let response = app_router(state())
            .oneshot(Request::get("/sentiment").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(error_message(response).await, METHOD_NOT_ALLOWED_MESSAGE);
    }
}
