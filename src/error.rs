//! Application error type and its HTTP mapping.
//!
//! Every failure a request can hit is an [`AppError`] variant, translated to a
//! response in exactly one place ([`IntoResponse`] for [`AppError`]).

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use validator::ValidationErrors;

use crate::domain::classifier::ClassifierError;
use crate::domain::limiter::RateLimitError;

/// Message returned when `text` is absent or the body is not a JSON object.
pub const MISSING_TEXT_MESSAGE: &str = "Bad Request: Missing 'text' parameter in the request body.";

/// Message returned when `text` is longer than the allowed number of characters.
pub const TEXT_TOO_LONG_MESSAGE: &str =
    "Bad Request: 'text' parameter should not exceed 1000 characters.";

/// Fixed message for throttled requests.
pub const RATE_LIMITED_MESSAGE: &str = "Rate limit exceeded. Please try again later.";

pub const NOT_FOUND_MESSAGE: &str = "Not Found: The requested URL was not found on the server.";

pub const METHOD_NOT_ALLOWED_MESSAGE: &str =
    "Method Not Allowed: The method is not allowed for the requested URL.";

/// JSON body of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Client input failed validation (400).
    #[error("{0}")]
    InvalidInput(String),
    /// A rate limit window is exhausted (429).
    #[error("{}", RATE_LIMITED_MESSAGE)]
    RateLimited,
    /// No route matches the path (404).
    #[error("{}", NOT_FOUND_MESSAGE)]
    NotFound,
    /// The route exists but not for this method (405).
    #[error("{}", METHOD_NOT_ALLOWED_MESSAGE)]
    MethodNotAllowed,
    /// Anything else; the message is passed to the client unchanged (500).
    #[error("{0}")]
    Internal(String),
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn missing_text() -> Self {
        Self::bad_request(MISSING_TEXT_MESSAGE)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidInput(_) => StatusCode::BAD_REQUEST,
            Self::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        if let Self::Internal(message) = &self {
            tracing::error!(error = %message, "Request failed");
        }

        let body = ErrorBody {
            error: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let message = errors
            .field_errors()
            .values()
            .flat_map(|errs| errs.iter())
            .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
            .unwrap_or_else(|| errors.to_string());

        Self::InvalidInput(message)
    }
}

impl From<ClassifierError> for AppError {
    fn from(e: ClassifierError) -> Self {
        Self::Internal(e.to_string())
    }
}

impl From<RateLimitError> for AppError {
    fn from(e: RateLimitError) -> Self {
        Self::Internal(e.to_string())
    }
}
