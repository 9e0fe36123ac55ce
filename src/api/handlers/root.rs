//! Handler for the service description endpoint.

use axum::Json;

use crate::api::dto::root::ServiceInfo;

/// Describes the service and lists its endpoints.
///
/// # Endpoint
///
/// `GET /`
pub async fn root_handler() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        service: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        endpoints: vec![
            "POST /api/v1/urls",
            "DELETE /api/v1/urls/{id}",
            "GET /api/v1/metrics/domains?limit=N",
            "GET /{code}",
            "GET /health",
        ],
    })
}
