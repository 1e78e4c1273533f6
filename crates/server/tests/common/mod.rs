//! Common test utilities for E2E testing with mocks.
//!
//! This module provides a test fixture that creates an in-process server
//! with a mock remote QA client injected, so the whole HTTP stack can be
//! exercised without a real inference endpoint.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use faqbot_core::testing::MockQaClient;
use faqbot_core::{Config, QaClient};
use faqbot_server::state::AppState;

/// Re-export fixtures for test convenience
pub use faqbot_core::testing::fixtures;

/// Context string the warm-up call sends.
pub const WARMUP_CONTEXT: &str = "This is a warm-up request.";

/// Test fixture for E2E testing with a mock QA client.
///
/// # Example
///
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_chat() {
///     let fixture = TestFixture::new();
///
///     let response = fixture.post("/chat", json!({"message": "hello"})).await;
///
///     assert_eq!(response.status, 200);
/// }
/// ```
pub struct TestFixture {
    /// The Axum router for testing
    pub router: Router,
    /// Mock QA client - script scores and inspect calls
    pub qa: Arc<MockQaClient>,
    /// Shared state behind the router
    pub state: Arc<AppState>,
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
    pub text: String,
}

impl TestFixture {
    /// Fixture with the shop FAQ corpus and a mock holding a credential.
    pub fn new() -> Self {
        Self::with_parts(
            fixtures::config_with_faq(fixtures::faq_entries()),
            MockQaClient::new(),
        )
    }

    /// Fixture with the shop FAQ corpus and a mock without a credential.
    pub fn without_credential() -> Self {
        Self::with_parts(
            fixtures::config_with_faq(fixtures::faq_entries()),
            MockQaClient::without_credential(),
        )
    }

    /// Fixture with a custom configuration and mock.
    pub fn with_parts(config: Config, qa: MockQaClient) -> Self {
        let qa = Arc::new(qa);
        let state = Arc::new(AppState::new(
            config,
            Arc::clone(&qa) as Arc<dyn QaClient>,
        ));
        let router = faqbot_server::api::create_router(Arc::clone(&state));

        Self { router, qa, state }
    }

    /// Remote queries made for chat messages, warm-up excluded.
    pub async fn chat_queries(&self) -> Vec<faqbot_core::testing::RecordedQuery> {
        self.qa
            .recorded_calls()
            .await
            .into_iter()
            .filter(|call| call.context != WARMUP_CONTEXT)
            .collect()
    }

    /// Send a GET request to the test server.
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request("GET", path, None).await
    }

    /// Send a POST request with JSON body.
    pub async fn post(&self, path: &str, body: Value) -> TestResponse {
        self.request("POST", path, Some(body)).await
    }

    /// Send a POST request with raw string body (for testing malformed JSON).
    pub async fn post_raw(&self, path: &str, body: &str) -> TestResponse {
        self.request_raw("POST", path, body, "application/json").await
    }

    /// Send a request with raw string body and custom content type.
    async fn request_raw(
        &self,
        method: &str,
        path: &str,
        body: &str,
        content_type: &str,
    ) -> TestResponse {
        let request = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", content_type)
            .body(Body::from(body.to_string()))
            .unwrap();

        self.send(request).await
    }

    /// Send a request to the test server.
    async fn request(&self, method: &str, path: &str, body: Option<Value>) -> TestResponse {
        let mut request_builder = Request::builder().method(method).uri(path);

        let body = if let Some(json_body) = body {
            request_builder = request_builder.header("Content-Type", "application/json");
            Body::from(serde_json::to_vec(&json_body).unwrap())
        } else {
            Body::empty()
        };

        let request = request_builder.body(body).unwrap();
        self.send(request).await
    }

    async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes();

        let text = String::from_utf8_lossy(&body_bytes).to_string();
        let body: Value = if body_bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body_bytes).unwrap_or(Value::Null)
        };

        TestResponse { status, body, text }
    }
}
