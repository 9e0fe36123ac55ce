//! Handler for short URL removal.

use axum::{
    extract::{Path, State},
    http::StatusCode,
};

use crate::error::AppError;
use crate::state::AppState;

/// Removes a short URL from the registry.
///
/// # Endpoint
///
/// `DELETE /api/v1/urls/{id}`
///
/// The code stops resolving immediately. The domain ranking is not
/// decremented.
///
/// # Errors
///
/// Returns 404 Not Found if no record has this id.
pub async fn delete_url_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    state.link_service.delete_url(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
