//! Shared test harness: a wiremock server and a client pointed at it.

#![allow(dead_code)]

use openmonetize_client::{ClientOptions, EventEnvelope, OpenMonetizeClient};
use wiremock::MockServer;

pub const API_KEY: &str = "om_live_test_key";

pub struct TestHarness {
    pub server: MockServer,
    pub client: OpenMonetizeClient,
}

impl TestHarness {
    pub async fn new() -> Self {
        let server = MockServer::start().await;
        let options = ClientOptions::default()
            .with_base_url(server.uri())
            .with_timeout_seconds(5);
        let client = OpenMonetizeClient::with_options(API_KEY, options).unwrap();
        Self { server, client }
    }
}

pub fn envelope(event_id: &str) -> EventEnvelope {
    EventEnvelope::new(event_id, "cust-123", "ai-chat", "2024-01-01T00:00:00Z").unwrap()
}
