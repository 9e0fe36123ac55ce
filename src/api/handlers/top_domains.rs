//! Handler for the top domains endpoint.

use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};

use crate::api::dto::top_domains::{TopDomainsQuery, TopDomainsResponse};
use crate::application::services::ranking_service::effective_limit;
use crate::error::AppError;
use crate::state::AppState;

/// Returns the most shortened domains.
///
/// # Endpoint
///
/// `GET /api/v1/metrics/domains?limit=3`
///
/// Missing, unparsable and non-positive limits use the default of 3.
///
/// # Response
///
/// ```json
/// {
///   "top_domains": [
///     { "domain": "github.com", "count": 4 },
///     { "domain": "docs.rs", "count": 2 }
///   ],
///   "limit": 3
/// }
/// ```
pub async fn top_domains_handler(
    State(state): State<AppState>,
    query: Result<Query<TopDomainsQuery>, QueryRejection>,
) -> Result<Json<TopDomainsResponse>, AppError> {
    let requested = query.map(|Query(q)| q.requested_limit()).unwrap_or(0);
    let limit = effective_limit(requested);

    let top_domains = state.ranking_service.top_domains(limit).await?;

    Ok(Json(TopDomainsResponse { top_domains, limit }))
}
