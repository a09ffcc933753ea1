//! DTOs for the sentiment endpoint.

use serde::Serialize;
use serde_json::Value;
use std::borrow::Cow;
use validator::{Validate, ValidationError};

use crate::domain::sentiment::SentimentLabel;
use crate::error::{AppError, TEXT_TOO_LONG_MESSAGE};

/// Maximum length of `text`, in characters.
pub const MAX_TEXT_CHARS: usize = 1000;

/// Request to classify a piece of text.
#[derive(Debug, Validate)]
pub struct SentimentRequest {
    /// Text to classify; length is counted in characters, not bytes.
    #[validate(custom(function = "validate_text_length"))]
    pub text: String,
}

fn validate_text_length(text: &str) -> Result<(), ValidationError> {
    if text.chars().count() > MAX_TEXT_CHARS {
        let mut error = ValidationError::new("length");
        error.message = Some(Cow::Borrowed(TEXT_TOO_LONG_MESSAGE));
        return Err(error);
    }
    Ok(())
}

impl SentimentRequest {
    /// Extracts the request from a raw body.
    ///
    /// A body that is not valid JSON, or not a JSON object, is treated the
    /// same as one without `text`.
    ///
    /// # Errors
    ///
    /// - [`AppError::InvalidInput`] if `text` is missing
    /// - [`AppError::Internal`] if `text` is present but not a string
    pub fn from_body(body: &[u8]) -> Result<Self, AppError> {
        let Ok(Value::Object(mut fields)) = serde_json::from_slice::<Value>(body) else {
            return Err(AppError::missing_text());
        };

        let text = fields.remove("text").ok_or_else(AppError::missing_text)?;
        let text: String =
            serde_json::from_value(text).map_err(|e| AppError::internal(e.to_string()))?;

        Ok(Self { text })
    }
}

/// Classification result.
#[derive(Debug, Serialize)]
pub struct SentimentResponse {
    pub sentiment: SentimentLabel,
}
