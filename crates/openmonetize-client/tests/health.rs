//! Health endpoint integration tests.

mod common;

use common::TestHarness;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn health_ok() {
    let harness = TestHarness::new().await;

    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "ok",
            "timestamp": "2025-01-01T00:00:00.000Z"
        })))
        .mount(&harness.server)
        .await;

    let health = harness.client.health().health().await.unwrap();
    assert_eq!(health.status, "ok");
}

#[tokio::test]
async fn ready_returns_degraded_report_on_503() {
    let harness = TestHarness::new().await;

    Mock::given(method("GET"))
        .and(path("/ready"))
        .respond_with(ResponseTemplate::new(503).set_body_json(json!({
            "status": "degraded",
            "checks": {"database": true, "ingestionService": false, "ratingEngine": true},
            "timestamp": "2025-01-01T00:00:00.000Z"
        })))
        .mount(&harness.server)
        .await;

    let readiness = harness.client.health().ready().await.unwrap();
    assert!(!readiness.is_ready());
    assert_eq!(readiness.checks.get("ingestionService"), Some(&false));
}

#[tokio::test]
async fn ready_still_fails_on_other_errors() {
    let harness = TestHarness::new().await;

    Mock::given(method("GET"))
        .and(path("/ready"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&harness.server)
        .await;

    let err = harness.client.health().ready().await.unwrap_err();
    assert_eq!(err.status(), Some(500));
    assert_eq!(err.to_string(), "API error: 500 - HTTP 500");
}

#[tokio::test]
async fn service_info() {
    let harness = TestHarness::new().await;

    Mock::given(method("GET"))
        .and(path("/v1/info"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "service": "api-gateway",
            "version": "0.1.0",
            "environment": "production",
            "uptime": 3600.5
        })))
        .mount(&harness.server)
        .await;

    let info = harness.client.health().info().await.unwrap();
    assert_eq!(info.service, "api-gateway");
    assert_eq!(info.uptime, Some(3600.5));
}
