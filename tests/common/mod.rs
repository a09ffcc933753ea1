#![allow(dead_code)]

use axum::http::{HeaderName, HeaderValue};
use axum_test::{TestRequest, TestServer};
use sentiment_api::prelude::*;
use sentiment_api::routes::router;
use std::sync::Arc;

/// Classifier that always returns the same polarity.
pub struct FixedClassifier(pub f64);

impl SentimentClassifier for FixedClassifier {
    fn polarity(&self, _text: &str) -> Result<f64, ClassifierError> {
        Ok(self.0)
    }
}

/// Classifier that always fails with the given message.
pub struct FailingClassifier(pub &'static str);

impl SentimentClassifier for FailingClassifier {
    fn polarity(&self, _text: &str) -> Result<f64, ClassifierError> {
        Err(ClassifierError::Failed(self.0.to_string()))
    }
}

/// 1000/day and 100/hour shared, 10/hour on `/sentiment`.
pub fn default_policy() -> RateLimitPolicy {
    RateLimitPolicy::new([RateLimit::per_day(1000), RateLimit::per_hour(100)])
        .with_route("/sentiment", [RateLimit::per_hour(10)])
}

/// State with an in-memory limiter; client keys come from `X-Forwarded-For`.
pub fn create_test_state_with(
    classifier: Arc<dyn SentimentClassifier>,
    policy: RateLimitPolicy,
) -> AppState {
    AppState::new(
        Arc::new(SentimentService::new(classifier)),
        Arc::new(InMemoryRateLimiter::new()),
        policy,
        true,
    )
}

pub fn create_test_state(classifier: Arc<dyn SentimentClassifier>) -> AppState {
    create_test_state_with(classifier, default_policy())
}

pub fn lexicon_state() -> AppState {
    create_test_state(Arc::new(LexiconClassifier::new()))
}

pub fn test_server(state: AppState) -> TestServer {
    TestServer::new(router(state)).unwrap()
}

/// Marks a request as coming from `ip`.
pub fn from_client(request: TestRequest, ip: &str) -> TestRequest {
    request.add_header(
        HeaderName::from_static("x-forwarded-for"),
        HeaderValue::from_str(ip).unwrap(),
    )
}
