//! API route configuration, nested under `/api/v1`.

use crate::api::handlers::{delete_url_handler, shorten_handler, top_domains_handler};
use crate::state::AppState;
use axum::{
    Router,
    routing::{delete, get, post},
};

/// REST API routes.
///
/// # Endpoints
///
/// - `POST   /urls`             - Shorten a URL
/// - `DELETE /urls/{id}`        - Remove a short URL
/// - `GET    /metrics/domains`  - Most shortened domains
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/urls", post(shorten_handler))
        .route("/urls/{id}", delete(delete_url_handler))
        .route("/metrics/domains", get(top_domains_handler))
}
