#![allow(dead_code)]

use axum::{Router, ServiceExt};
use axum::extract::Request;
use axum::routing::IntoMakeService;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::task::JoinHandle;
use tower_http::normalize_path::NormalizePath;
use linkrank::routes::app_router;
use linkrank::config::Config;
use linkrank::state::AppState;

static FLUSH_SEQ: AtomicUsize = AtomicUsize::new(0);

pub fn test_config() -> Config {
    Config {
        base_url: "http://localhost:3000".to_string(),
        ranking_queue_capacity: 100,
        ranking_max_retries: 0,
        ..Config::default()
    }
}

/// Builds a state backed by fresh in-memory repositories with a running
/// ranking worker.
pub fn create_test_state() -> (AppState, JoinHandle<()>) {
    AppState::start(&test_config())
}

/// The production application, including middleware.
pub fn test_router(state: AppState) -> IntoMakeService<NormalizePath<Router>> {
    ServiceExt::<Request>::into_make_service(app_router(state))
}

/// Polls the ranking until `domain` reaches `expected`.
pub async fn wait_for_count(state: &AppState, domain: &str, expected: u64) {
    let result = tokio::time::timeout(Duration::from_secs(2), async {
        loop {
            let count = state.ranking_service.domain_count(domain).await.unwrap();
            if count >= expected {
                return count;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await;

    match result {
        Ok(count) => assert_eq!(count, expected, "count of {domain} overshot"),
        Err(_) => panic!("timed out waiting for {domain} to reach {expected}"),
    }
}

/// Waits until every ranking event queued so far has been applied.
///
/// Registers a fresh URL on a sentinel domain and waits for it to be counted;
/// the worker handles events in order.
pub async fn flush_ranking(state: &AppState) {
    let before = state
        .ranking_service
        .domain_count("flush.test")
        .await
        .unwrap();
    let seq = FLUSH_SEQ.fetch_add(1, Ordering::SeqCst);

    state
        .link_service
        .create_short_url(&format!("https://flush.test/{seq}"))
        .await
        .unwrap();

    wait_for_count(state, "flush.test", before + 1).await;
}
