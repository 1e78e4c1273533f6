//! Mock remote QA client for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::qa::{QaClient, QaFailure, QueryResult};

/// A recorded query for test assertions.
#[derive(Debug, Clone)]
pub struct RecordedQuery {
    /// The question that was asked.
    pub question: String,
    /// The context passage it was scored against.
    pub context: String,
}

/// Mock implementation of the QaClient trait.
///
/// Provides controllable behavior for testing:
/// - Scripted responses keyed by context passage
/// - A default response for everything else
/// - Recorded queries for assertions
///
/// # Example
///
/// ```rust,ignore
/// use faqbot_core::testing::MockQaClient;
///
/// let qa = MockQaClient::new();
/// qa.respond_to_context("We ship worldwide.", QueryResult::answered("worldwide", 0.8)).await;
///
/// let result = qa.query("where do you ship?", "We ship worldwide.").await;
/// assert_eq!(result.answer.as_deref(), Some("worldwide"));
/// assert_eq!(qa.call_count().await, 1);
/// ```
#[derive(Debug)]
pub struct MockQaClient {
    model: String,
    has_credential: bool,
    /// Responses keyed by exact context string.
    by_context: Arc<RwLock<HashMap<String, QueryResult>>>,
    /// Response for contexts with no scripted entry.
    default_response: Arc<RwLock<QueryResult>>,
    /// Recorded queries.
    calls: Arc<RwLock<Vec<RecordedQuery>>>,
}

impl Default for MockQaClient {
    fn default() -> Self {
        Self::new()
    }
}

impl MockQaClient {
    /// Create a mock with a credential that answers nothing useful by default.
    pub fn new() -> Self {
        Self {
            model: "mock/qa-model".to_string(),
            has_credential: true,
            by_context: Arc::new(RwLock::new(HashMap::new())),
            default_response: Arc::new(RwLock::new(QueryResult::answered("", 0.0))),
            calls: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Create a mock behaving like a client with no API token.
    pub fn without_credential() -> Self {
        Self {
            has_credential: false,
            ..Self::new()
        }
    }

    /// Answer queries against `context` with `result`.
    pub async fn respond_to_context(&self, context: impl Into<String>, result: QueryResult) {
        self.by_context.write().await.insert(context.into(), result);
    }

    /// Answer every unscripted context with `result`.
    pub async fn set_default_response(&self, result: QueryResult) {
        *self.default_response.write().await = result;
    }

    /// All queries made so far, in order.
    pub async fn recorded_calls(&self) -> Vec<RecordedQuery> {
        self.calls.read().await.clone()
    }

    pub async fn call_count(&self) -> usize {
        self.calls.read().await.len()
    }

    pub async fn clear_calls(&self) {
        self.calls.write().await.clear();
    }
}

#[async_trait]
impl QaClient for MockQaClient {
    fn provider(&self) -> &str {
        "mock"
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn has_credential(&self) -> bool {
        self.has_credential
    }

    async fn query(&self, question: &str, context: &str) -> QueryResult {
        self.calls.write().await.push(RecordedQuery {
            question: question.to_string(),
            context: context.to_string(),
        });

        if !self.has_credential {
            return QueryResult::failed(QaFailure::MissingCredential);
        }

        if let Some(result) = self.by_context.read().await.get(context) {
            return result.clone();
        }
        self.default_response.read().await.clone()
    }
}
