//! Handler for the sentiment endpoint.

use axum::{
    Json,
    body::Bytes,
    extract::{State, rejection::BytesRejection},
};
use validator::Validate;

use crate::api::dto::sentiment::{SentimentRequest, SentimentResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Classifies a short text as positive, negative, or neutral.
///
/// # Endpoint
///
/// `POST /sentiment`
///
/// # Request Body
///
/// ```json
/// { "text": "I love this product" }
/// ```
///
/// # Response
///
/// ```json
/// { "sentiment": "positive" }
/// ```
///
/// # Errors
///
/// - **400** if `text` is missing (or the body is not a JSON object) or
///   longer than 1000 characters
/// - **500** with the raw error message if `text` is not a string or the
///   classifier fails
///
/// Rate limiting (429) happens in middleware before this handler runs.
/// The route carries no body size cap, so oversized text still gets the
/// length message; a body that cannot be read is a 500.
pub async fn sentiment_handler(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<SentimentResponse>, AppError> {
    let body = body.map_err(|rejection| AppError::internal(rejection.body_text()))?;
    let request = SentimentRequest::from_body(&body)?;
    request.validate()?;

    let sentiment = state.sentiment_service.classify(&request.text)?;

    Ok(Json(SentimentResponse { sentiment }))
}
