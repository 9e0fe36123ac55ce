mod common;

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::json;

#[tokio::test]
async fn test_health_check_healthy() {
    let (state, _worker) = common::create_test_state();
    let server = TestServer::new(common::test_router(state)).unwrap();

    let response = server.get("/health").await;

    response.assert_status_ok();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "healthy");
    assert!(json["version"].is_string());
    assert_eq!(json["checks"]["registry"]["status"], "ok");
    assert_eq!(json["checks"]["ranking"]["status"], "ok");
    assert_eq!(json["checks"]["ranking_queue"]["status"], "ok");
}

#[tokio::test]
async fn test_health_check_reports_counts() {
    let (state, _worker) = common::create_test_state();
    let server = TestServer::new(common::test_router(state.clone())).unwrap();

    server
        .post("/api/v1/urls")
        .json(&json!({ "url": "https://github.com/golang/go" }))
        .await
        .assert_status(StatusCode::CREATED);
    common::wait_for_count(&state, "github.com", 1).await;

    let json = server.get("/health").await.json::<serde_json::Value>();
    assert_eq!(json["checks"]["registry"]["message"], "1 URLs registered");
    assert_eq!(json["checks"]["ranking"]["message"], "1 domains tracked");
}

#[tokio::test]
async fn test_health_check_degraded_without_worker() {
    let (state, worker) = common::create_test_state();
    let server = TestServer::new(common::test_router(state)).unwrap();

    worker.abort();
    let _ = worker.await;

    let response = server.get("/health").await;

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["checks"]["ranking_queue"]["status"], "error");
}

#[tokio::test]
async fn test_shorten_still_counts_without_worker() {
    let (state, worker) = common::create_test_state();
    let server = TestServer::new(common::test_router(state.clone())).unwrap();

    worker.abort();
    let _ = worker.await;

    server
        .post("/api/v1/urls")
        .json(&json!({ "url": "https://github.com/golang/go" }))
        .await
        .assert_status(StatusCode::CREATED);

    assert_eq!(
        state.ranking_service.domain_count("github.com").await.unwrap(),
        1
    );
}

#[tokio::test]
async fn test_root_lists_endpoints() {
    let (state, _worker) = common::create_test_state();
    let server = TestServer::new(common::test_router(state)).unwrap();

    let response = server.get("/").await;

    response.assert_status_ok();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["service"], "linkrank");
    let endpoints = json["endpoints"].as_array().unwrap();
    assert!(endpoints.contains(&json!("POST /api/v1/urls")));
    assert!(endpoints.contains(&json!("GET /api/v1/metrics/domains?limit=N")));
}

#[tokio::test]
async fn test_health_check_trailing_slash() {
    let (state, _worker) = common::create_test_state();
    let server = TestServer::new(common::test_router(state)).unwrap();

    server.get("/health/").await.assert_status_ok();
}
