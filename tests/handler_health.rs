mod common;

use async_trait::async_trait;
use axum::http::StatusCode;
use sentiment_api::prelude::*;
use std::sync::Arc;

/// Limiter whose backend is always down.
struct UnreachableLimiter;

#[async_trait]
impl RateLimiter for UnreachableLimiter {
    async fn check_and_increment(
        &self,
        _client_key: &str,
        _windows: &[RateWindow],
    ) -> Result<bool, RateLimitError> {
        Ok(true)
    }

    async fn health_check(&self) -> bool {
        false
    }

    fn backend(&self) -> &'static str {
        "redis"
    }
}

#[tokio::test]
async fn test_health_endpoint_success() {
    let server = common::test_server(common::lexicon_state());

    let response = server.get("/health").await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["checks"]["rate_limiter"]["status"], "ok");
    assert_eq!(json["checks"]["rate_limiter"]["message"], "Backend: memory");
}

#[tokio::test]
async fn test_health_endpoint_structure() {
    let server = common::test_server(common::lexicon_state());

    let response = server.get("/health").await;

    let json = response.json::<serde_json::Value>();
    assert!(json.get("status").is_some());
    assert!(json.get("version").is_some());
    assert!(json.get("checks").is_some());
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_health_endpoint_degraded() {
    let state = AppState::new(
        Arc::new(SentimentService::new(Arc::new(LexiconClassifier::new()))),
        Arc::new(UnreachableLimiter),
        common::default_policy(),
        true,
    );
    let server = common::test_server(state);

    let response = server.get("/health").await;

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["checks"]["rate_limiter"]["status"], "error");
    assert_eq!(
        json["checks"]["rate_limiter"]["message"],
        "Backend redis is unreachable"
    );
}
