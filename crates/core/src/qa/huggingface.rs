//! Hugging Face Inference API client for extractive question answering.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::debug;

use crate::config::RemoteQaConfig;
use crate::metrics::{QA_QUERIES_TOTAL, QA_QUERY_DURATION};

use super::retry::{AttemptOutcome, RetryPolicy};
use super::traits::QaClient;
use super::types::{QaFailure, QueryResult};

/// Client for a hosted question-answering model.
///
/// Sends `{"inputs": {"question", "context"}}` to `{api_base}/{model}` and
/// reads back `{"answer", "score"}`. Cold models answer 503 with an
/// `estimated_time` hint; see [`RetryPolicy`] for how that is handled.
pub struct HuggingFaceQaClient {
    client: Client,
    endpoint: String,
    model: String,
    api_token: Option<String>,
    policy: RetryPolicy,
}

impl std::fmt::Debug for HuggingFaceQaClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HuggingFaceQaClient")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .field("api_token", &self.api_token.as_ref().map(|_| "<redacted>"))
            .field("policy", &self.policy)
            .finish()
    }
}

impl HuggingFaceQaClient {
    /// Create a client from configuration.
    pub fn new(config: &RemoteQaConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            endpoint: format!(
                "{}/{}",
                config.api_base.trim_end_matches('/'),
                config.model
            ),
            model: config.model.clone(),
            api_token: config.token().map(str::to_string),
            policy: RetryPolicy::from_config(config),
        })
    }

    /// Full URL requests are posted to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// One HTTP round trip, classified for the retry loop.
    async fn attempt(&self, token: &str, request: &QaRequest<'_>) -> AttemptOutcome {
        let response = match self
            .client
            .post(&self.endpoint)
            .bearer_auth(token)
            .json(request)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) if e.is_timeout() => return AttemptOutcome::Failed(format!("Timeout: {}", e)),
            Err(e) => return AttemptOutcome::Failed(format!("HTTP error: {}", e)),
        };

        let status = response.status();

        if status == StatusCode::SERVICE_UNAVAILABLE {
            let body = response.text().await.unwrap_or_default();
            return classify_unavailable(&body);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return AttemptOutcome::Failed(format!("HTTP {}: {}", status, snippet(&body)));
        }

        match response.json::<QaResponse>().await {
            Ok(parsed) => {
                let best = parsed.into_first();
                AttemptOutcome::Success {
                    answer: best.answer.unwrap_or_default(),
                    score: best.score.unwrap_or(0.0),
                }
            }
            Err(e) => AttemptOutcome::Failed(format!("Failed to parse response: {}", e)),
        }
    }
}

#[async_trait]
impl QaClient for HuggingFaceQaClient {
    fn provider(&self) -> &str {
        "huggingface"
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn has_credential(&self) -> bool {
        self.api_token.is_some()
    }

    async fn query(&self, question: &str, context: &str) -> QueryResult {
        let Some(token) = self.api_token.as_deref() else {
            debug!("No API token configured, skipping remote QA");
            QA_QUERIES_TOTAL
                .with_label_values(&["missing_credential"])
                .inc();
            return QueryResult::failed(QaFailure::MissingCredential);
        };

        let request = QaRequest {
            inputs: QaInputs { question, context },
        };
        let request = &request;

        let start = Instant::now();
        let result = self
            .policy
            .run(move |attempt| {
                debug!(model = %self.model, attempt, "Querying remote QA");
                self.attempt(token, request)
            })
            .await;

        QA_QUERY_DURATION.observe(start.elapsed().as_secs_f64());
        QA_QUERIES_TOTAL
            .with_label_values(&[result.outcome_label()])
            .inc();
        debug!(
            model = %self.model,
            outcome = result.outcome_label(),
            score = result.score,
            "Remote QA finished"
        );

        result
    }
}

// ============================================================================
// Wire types
// ============================================================================

#[derive(Debug, Serialize)]
struct QaRequest<'a> {
    inputs: QaInputs<'a>,
}

#[derive(Debug, Serialize)]
struct QaInputs<'a> {
    question: &'a str,
    context: &'a str,
}

#[derive(Debug, Default, Deserialize)]
struct QaAnswer {
    #[serde(default)]
    answer: Option<String>,
    #[serde(default)]
    score: Option<f64>,
}

/// The endpoint answers with one object, or a list when more than one span is requested.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum QaResponse {
    Many(Vec<QaAnswer>),
    Single(QaAnswer),
}

impl QaResponse {
    fn into_first(self) -> QaAnswer {
        match self {
            QaResponse::Single(answer) => answer,
            QaResponse::Many(answers) => answers.into_iter().next().unwrap_or_default(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct InferenceError {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    estimated_time: Option<f64>,
}

/// Split a 503 into "model is loading" (retry after a wait) and anything else (give up).
fn classify_unavailable(body: &str) -> AttemptOutcome {
    let parsed: InferenceError = serde_json::from_str(body).unwrap_or_default();
    let message = parsed.error.unwrap_or_else(|| snippet(body));

    if message.to_lowercase().contains("loading") {
        AttemptOutcome::ModelLoading {
            estimated_time: parsed.estimated_time,
        }
    } else {
        AttemptOutcome::Unavailable(message)
    }
}

fn snippet(body: &str) -> String {
    body.chars().take(200).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_loading_with_estimate() {
        let body =
            r#"{"error":"Model deepset/roberta-base-squad2 is currently loading","estimated_time":20.5}"#;
        assert_eq!(
            classify_unavailable(body),
            AttemptOutcome::ModelLoading {
                estimated_time: Some(20.5)
            }
        );
    }

    #[test]
    fn test_classify_loading_without_estimate() {
        let body = r#"{"error":"Model is Loading"}"#;
        assert_eq!(
            classify_unavailable(body),
            AttemptOutcome::ModelLoading {
                estimated_time: None
            }
        );
    }

    #[test]
    fn test_classify_other_unavailable() {
        let body = r#"{"error":"Service temporarily overloaded"}"#;
        assert_eq!(
            classify_unavailable(body),
            AttemptOutcome::Unavailable("Service temporarily overloaded".to_string())
        );
    }

    #[test]
    fn test_classify_non_json_body() {
        assert_eq!(
            classify_unavailable("upstream down"),
            AttemptOutcome::Unavailable("upstream down".to_string())
        );
    }

    #[test]
    fn test_parse_single_answer() {
        let parsed: QaResponse =
            serde_json::from_str(r#"{"score":0.63,"start":0,"end":5,"answer":"Paris"}"#).unwrap();
        let best = parsed.into_first();
        assert_eq!(best.answer.as_deref(), Some("Paris"));
        assert_eq!(best.score, Some(0.63));
    }

    #[test]
    fn test_parse_list_uses_first() {
        let parsed: QaResponse = serde_json::from_str(
            r#"[{"score":0.7,"answer":"first"},{"score":0.2,"answer":"second"}]"#,
        )
        .unwrap();
        assert_eq!(parsed.into_first().answer.as_deref(), Some("first"));
    }

    #[test]
    fn test_parse_missing_fields_default() {
        let parsed: QaResponse = serde_json::from_str("{}").unwrap();
        let best = parsed.into_first();
        assert_eq!(best.answer, None);
        assert_eq!(best.score, None);

        let parsed: QaResponse = serde_json::from_str("[]").unwrap();
        assert_eq!(parsed.into_first().answer, None);
    }

    #[test]
    fn test_request_shape() {
        let request = QaRequest {
            inputs: QaInputs {
                question: "what?",
                context: "this.",
            },
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            serde_json::json!({"inputs": {"question": "what?", "context": "this."}})
        );
    }

    #[test]
    fn test_endpoint_joins_base_and_model() {
        let config = RemoteQaConfig {
            api_base: "http://localhost:9000/models/".to_string(),
            model: "org/model".to_string(),
            ..Default::default()
        };
        let client = HuggingFaceQaClient::new(&config).unwrap();
        assert_eq!(client.endpoint(), "http://localhost:9000/models/org/model");
        assert_eq!(client.provider(), "huggingface");
        assert_eq!(client.model(), "org/model");
        assert!(!client.has_credential());
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = RemoteQaConfig {
            api_token: Some("hf_secret".to_string()),
            ..Default::default()
        };
        let client = HuggingFaceQaClient::new(&config).unwrap();
        let debug = format!("{:?}", client);
        assert!(!debug.contains("hf_secret"));
        assert!(client.has_credential());
    }

    #[tokio::test]
    async fn test_query_without_token_makes_no_request() {
        let config = RemoteQaConfig {
            // Unroutable: a request here would fail, not return MissingCredential
            api_base: "http://127.0.0.1:1".to_string(),
            ..Default::default()
        };
        let client = HuggingFaceQaClient::new(&config).unwrap();
        let result = client.query("hello?", "context").await;
        assert_eq!(result.failure, Some(QaFailure::MissingCredential));
        assert_eq!(result.answer, None);
    }
}
