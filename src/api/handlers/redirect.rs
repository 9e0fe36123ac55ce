//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
};

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// Answers `301 Moved Permanently`; records are immutable, so clients may
/// cache the redirect.
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let original_url = state.link_service.resolve(&code).await?;
    tracing::debug!(code = %code, "Redirecting");

    Ok((
        StatusCode::MOVED_PERMANENTLY,
        [(header::LOCATION, original_url)],
    ))
}
