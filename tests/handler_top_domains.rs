mod common;

use axum_test::TestServer;
use serde_json::json;

async fn shorten(server: &TestServer, url: &str) {
    server
        .post("/api/v1/urls")
        .json(&json!({ "url": url }))
        .await
        .assert_status(axum::http::StatusCode::CREATED);
}

#[tokio::test]
async fn test_top_domains_empty() {
    let (state, _worker) = common::create_test_state();
    let server = TestServer::new(common::test_router(state)).unwrap();

    let response = server.get("/api/v1/metrics/domains").await;

    response.assert_status_ok();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["top_domains"], json!([]));
    assert_eq!(json["limit"], 3);
}

#[tokio::test]
async fn test_shorten_resolve_and_rank_scenario() {
    let (state, _worker) = common::create_test_state();
    let server = TestServer::new(common::test_router(state.clone())).unwrap();

    let created = server
        .post("/api/v1/urls")
        .json(&json!({ "url": "https://github.com/golang/go" }))
        .await
        .json::<serde_json::Value>();
    let code = created["short_code"].as_str().unwrap();
    assert_eq!(code.len(), 6);

    let url = state.link_service.resolve(code).await.unwrap();
    assert_eq!(url, "https://github.com/golang/go");

    common::wait_for_count(&state, "github.com", 1).await;

    let json = server
        .get("/api/v1/metrics/domains?limit=3")
        .await
        .json::<serde_json::Value>();
    assert_eq!(
        json["top_domains"],
        json!([{ "domain": "github.com", "count": 1 }])
    );
}

#[tokio::test]
async fn test_top_domains_ordering_and_limit() {
    let (state, _worker) = common::create_test_state();
    let server = TestServer::new(common::test_router(state.clone())).unwrap();

    for i in 0..3 {
        shorten(&server, &format!("https://github.com/repo{i}")).await;
    }
    for i in 0..2 {
        shorten(&server, &format!("https://docs.rs/crate{i}")).await;
        shorten(&server, &format!("https://crates.io/c{i}")).await;
    }
    shorten(&server, "https://rust-lang.org").await;

    common::wait_for_count(&state, "github.com", 3).await;
    common::wait_for_count(&state, "docs.rs", 2).await;
    common::wait_for_count(&state, "crates.io", 2).await;
    common::wait_for_count(&state, "rust-lang.org", 1).await;

    let json = server
        .get("/api/v1/metrics/domains?limit=2")
        .await
        .json::<serde_json::Value>();
    assert_eq!(json["limit"], 2);
    assert_eq!(
        json["top_domains"],
        json!([
            { "domain": "github.com", "count": 3 },
            { "domain": "crates.io", "count": 2 }
        ])
    );

    let json = server
        .get("/api/v1/metrics/domains?limit=10")
        .await
        .json::<serde_json::Value>();
    let domains: Vec<&str> = json["top_domains"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["domain"].as_str().unwrap())
        .collect();
    assert_eq!(
        domains,
        vec!["github.com", "crates.io", "docs.rs", "rust-lang.org"]
    );
}

#[tokio::test]
async fn test_top_domains_invalid_limit_uses_default() {
    let (state, _worker) = common::create_test_state();
    let server = TestServer::new(common::test_router(state.clone())).unwrap();

    for domain in ["a.dev", "b.dev", "c.dev", "d.dev"] {
        shorten(&server, &format!("https://{domain}/x")).await;
    }
    common::wait_for_count(&state, "d.dev", 1).await;

    for query in ["limit=0", "limit=-5", "limit=abc", ""] {
        let json = server
            .get(&format!("/api/v1/metrics/domains?{query}"))
            .await
            .json::<serde_json::Value>();
        assert_eq!(json["limit"], 3, "query: {query}");
        assert_eq!(json["top_domains"].as_array().unwrap().len(), 3);
    }
}

#[tokio::test]
async fn test_reused_url_is_not_counted() {
    let (state, _worker) = common::create_test_state();
    let server = TestServer::new(common::test_router(state.clone())).unwrap();

    shorten(&server, "https://github.com/golang/go").await;
    shorten(&server, "https://github.com/golang/go/").await;
    shorten(&server, "https://github.com/golang/go?").await;

    common::flush_ranking(&state).await;
    assert_eq!(
        state.ranking_service.domain_count("github.com").await.unwrap(),
        1
    );
}

#[tokio::test]
async fn test_concurrent_creates_of_same_url_count_once() {
    let (state, _worker) = common::create_test_state();

    let mut handles = Vec::new();
    for _ in 0..16 {
        let state = state.clone();
        handles.push(tokio::spawn(async move {
            state
                .link_service
                .create_short_url("https://github.com/tokio-rs/tokio")
                .await
                .unwrap()
                .code
        }));
    }

    let mut codes = Vec::new();
    for handle in handles {
        codes.push(handle.await.unwrap());
    }
    codes.dedup();
    assert_eq!(codes.len(), 1);

    common::flush_ranking(&state).await;
    assert_eq!(
        state.ranking_service.domain_count("github.com").await.unwrap(),
        1
    );
}

#[tokio::test]
async fn test_top_domains_accepts_trailing_slash() {
    let (state, _worker) = common::create_test_state();
    let server = TestServer::new(common::test_router(state.clone())).unwrap();

    shorten(&server, "https://github.com/golang/go").await;
    common::wait_for_count(&state, "github.com", 1).await;

    let response = server.get("/api/v1/metrics/domains/?limit=1").await;

    response.assert_status_ok();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["limit"], 1);
    assert_eq!(
        json["top_domains"],
        json!([{ "domain": "github.com", "count": 1 }])
    );
}

#[tokio::test]
async fn test_api_routes_require_version_prefix() {
    let (state, _worker) = common::create_test_state();
    let server = TestServer::new(common::test_router(state)).unwrap();

    server
        .get("/metrics/domains")
        .await
        .assert_status_not_found();
}
