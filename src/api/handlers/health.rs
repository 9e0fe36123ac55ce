//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::state::AppState;

/// Returns service health status with component checks.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: All components healthy
/// - **503 Service Unavailable**: The ranking worker stopped or a store failed
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": {
///     "registry": { "status": "ok", "message": "12 URLs registered" },
///     "ranking": { "status": "ok", "message": "5 domains tracked" },
///     "ranking_queue": { "status": "ok", "message": "Capacity: 10000" }
///   }
/// }
/// ```
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let registry = check_registry(&state).await;
    let ranking = check_ranking(&state).await;
    let ranking_queue = check_ranking_queue(&state);

    let all_healthy = registry.is_ok() && ranking.is_ok() && ranking_queue.is_ok();

    let response = HealthResponse {
        status: if all_healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks {
            registry,
            ranking,
            ranking_queue,
        },
    };

    if all_healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

async fn check_registry(state: &AppState) -> CheckStatus {
    match state.link_service.count_urls().await {
        Ok(count) => CheckStatus::ok(format!("{} URLs registered", count)),
        Err(e) => CheckStatus::error(format!("Registry error: {}", e)),
    }
}

async fn check_ranking(state: &AppState) -> CheckStatus {
    match state.ranking_service.tracked_domains().await {
        Ok(count) => CheckStatus::ok(format!("{} domains tracked", count)),
        Err(e) => CheckStatus::error(format!("Ranking error: {}", e)),
    }
}

/// Checks if the ranking worker is still consuming events.
fn check_ranking_queue(state: &AppState) -> CheckStatus {
    if state.link_service.is_ranking_queue_closed() {
        CheckStatus::error("Ranking queue is closed")
    } else {
        CheckStatus::ok(format!(
            "Capacity: {}",
            state.link_service.ranking_queue_available()
        ))
    }
}
