//! Handler for the URL shortening endpoint.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use serde_json::json;
use validator::Validate;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::error::{AppError, ValidationKind};
use crate::state::AppState;

/// Creates a short URL, or returns the existing one for an equivalent URL.
///
/// # Endpoint
///
/// `POST /api/v1/urls`
///
/// # Request Body
///
/// ```json
/// { "url": "https://github.com/golang/go" }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "short_code": "a7Kx9p",
///   "short_url": "http://localhost:3000/a7Kx9p",
///   "original_url": "https://github.com/golang/go"
/// }
/// ```
///
/// # Errors
///
/// - 400 for malformed JSON, empty or invalid URLs and disallowed schemes
/// - 403 for blocked domains
/// - 422 for URLs pointing at this service
pub async fn shorten_handler(
    State(state): State<AppState>,
    payload: Result<Json<ShortenRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ShortenResponse>), AppError> {
    let Json(payload) = payload.map_err(|e| {
        AppError::bad_request("Invalid request body", json!({ "reason": e.body_text() }))
    })?;
    payload.validate().map_err(|e| {
        AppError::validation(
            ValidationKind::InvalidUrl,
            "Invalid URL",
            json!({ "fields": e.to_string() }),
        )
    })?;

    let record = state.link_service.create_short_url(&payload.url).await?;
    let short_url = state.link_service.generate_short_url(&record.code);

    Ok((
        StatusCode::CREATED,
        Json(ShortenResponse::new(record, short_url)),
    ))
}
