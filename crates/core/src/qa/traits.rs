//! Remote QA client trait.

use async_trait::async_trait;

use super::types::QueryResult;

/// Scores a candidate context passage against a question.
///
/// Implementations never fail: transport and remote errors are folded into
/// the returned `QueryResult`.
#[async_trait]
pub trait QaClient: Send + Sync {
    /// Provider name (e.g., "huggingface")
    fn provider(&self) -> &str;

    /// Model id queried by this client.
    fn model(&self) -> &str;

    /// Whether an API credential is configured. Without one every query
    /// returns `QaFailure::MissingCredential` without touching the network.
    fn has_credential(&self) -> bool;

    /// Extract an answer to `question` from `context`.
    async fn query(&self, question: &str, context: &str) -> QueryResult;
}
