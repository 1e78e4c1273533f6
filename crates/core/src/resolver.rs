//! Answer resolution: exact FAQ match, then remote scoring, then fallback.
//!
//! On an FAQ miss the resolver probes the remote QA client once per FAQ
//! entry, using the entry's answer as the context passage. That is N
//! sequential remote calls for N entries, which only suits a small static
//! corpus; there is no index to narrow the candidates.

use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

use crate::config::ResolverConfig;
use crate::faq::FaqMatcher;
use crate::metrics::RESOLUTIONS_TOTAL;
use crate::qa::{QaClient, QaFailure, QueryResult};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("No message provided")]
    EmptyMessage,
}

/// Where a resolved answer came from.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolutionSource {
    /// Verbatim FAQ answer.
    Faq,
    /// Extracted by the remote endpoint with this confidence.
    Remote { score: f64 },
    /// Nothing qualified.
    Fallback,
}

impl ResolutionSource {
    pub fn label(&self) -> &'static str {
        match self {
            ResolutionSource::Faq => "faq",
            ResolutionSource::Remote { .. } => "remote",
            ResolutionSource::Fallback => "fallback",
        }
    }
}

/// Final answer for a chat message.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub response: String,
    pub source: ResolutionSource,
}

/// Orchestrates the FAQ matcher and the remote QA client.
pub struct AnswerResolver {
    matcher: FaqMatcher,
    qa: Arc<dyn QaClient>,
    confidence_threshold: f64,
    fallback_message: String,
}

impl AnswerResolver {
    pub fn new(matcher: FaqMatcher, qa: Arc<dyn QaClient>, config: &ResolverConfig) -> Self {
        Self {
            matcher,
            qa,
            confidence_threshold: config.confidence_threshold,
            fallback_message: config.fallback_message.clone(),
        }
    }

    pub fn qa_client(&self) -> &Arc<dyn QaClient> {
        &self.qa
    }

    /// Reject messages that must not reach the matcher or the remote client.
    pub fn check_message(text: &str) -> Result<(), ResolveError> {
        if text.is_empty() {
            return Err(ResolveError::EmptyMessage);
        }
        Ok(())
    }

    /// Resolve a user message to an answer.
    ///
    /// Only an empty message is an error. Remote failures degrade to the
    /// fallback message.
    pub async fn resolve(&self, text: &str) -> Result<Resolution, ResolveError> {
        Self::check_message(text)?;

        let resolution = match self.matcher.exact_match(text) {
            Some(answer) => Resolution {
                response: answer.to_string(),
                source: ResolutionSource::Faq,
            },
            None => self.resolve_remote(text).await,
        };

        RESOLUTIONS_TOTAL
            .with_label_values(&[resolution.source.label()])
            .inc();
        info!(source = resolution.source.label(), "Resolved chat message");

        Ok(resolution)
    }

    async fn resolve_remote(&self, text: &str) -> Resolution {
        let mut best: Option<QueryResult> = None;

        for (index, entry) in self.matcher.entries().iter().enumerate() {
            let result = self.qa.query(text, &entry.answer).await;
            debug!(
                entry = index,
                score = result.score,
                outcome = result.outcome_label(),
                "Scored FAQ context"
            );

            // Every further probe would fail the same way
            if result.failure == Some(QaFailure::MissingCredential) {
                break;
            }

            // Strictly greater: ties keep the earlier entry
            let better = best.as_ref().is_none_or(|b| result.score > b.score);
            if better {
                best = Some(result);
            }
        }

        match best {
            Some(result) if result.score >= self.confidence_threshold => {
                match result.answer_text() {
                    Some(answer) => Resolution {
                        response: answer.to_string(),
                        source: ResolutionSource::Remote {
                            score: result.score,
                        },
                    },
                    None => self.fallback(),
                }
            }
            _ => self.fallback(),
        }
    }

    fn fallback(&self) -> Resolution {
        Resolution {
            response: self.fallback_message.clone(),
            source: ResolutionSource::Fallback,
        }
    }
}
