mod common;

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::json;

#[tokio::test]
async fn test_redirect_success() {
    let (state, _worker) = common::create_test_state();
    let server = TestServer::new(common::test_router(state)).unwrap();

    let created = server
        .post("/api/v1/urls")
        .json(&json!({ "url": "https://github.com/golang/go" }))
        .await
        .json::<serde_json::Value>();
    let code = created["short_code"].as_str().unwrap();

    let response = server.get(&format!("/{code}")).await;

    response.assert_status(StatusCode::MOVED_PERMANENTLY);
    assert_eq!(
        response.header("location").to_str().unwrap(),
        "https://github.com/golang/go"
    );
}

#[tokio::test]
async fn test_redirect_not_found() {
    let (state, _worker) = common::create_test_state();
    let server = TestServer::new(common::test_router(state)).unwrap();

    let response = server.get("/zzzzzz").await;

    response.assert_status_not_found();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "not_found");
}

#[tokio::test]
async fn test_redirect_is_case_sensitive() {
    let (state, _worker) = common::create_test_state();
    let server = TestServer::new(common::test_router(state.clone())).unwrap();

    let record = state
        .link_service
        .create_short_url("https://rust-lang.org/learn")
        .await
        .unwrap();

    let swapped: String = record
        .code
        .chars()
        .map(|c| {
            if c.is_ascii_lowercase() {
                c.to_ascii_uppercase()
            } else {
                c.to_ascii_lowercase()
            }
        })
        .collect();

    server
        .get(&format!("/{}", record.code))
        .await
        .assert_status(StatusCode::MOVED_PERMANENTLY);

    if swapped != record.code {
        server
            .get(&format!("/{swapped}"))
            .await
            .assert_status_not_found();
    }
}
