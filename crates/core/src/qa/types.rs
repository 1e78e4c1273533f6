//! Result types for remote question answering.

use thiserror::Error;

/// Why a remote query produced no answer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QaFailure {
    #[error("No API credential configured")]
    MissingCredential,

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Gave up after {attempts} attempts: {last_error}")]
    Exhausted { attempts: u32, last_error: String },
}

/// Outcome of a single `QaClient::query` call.
///
/// Remote failures never surface as errors: a failed query carries no answer,
/// a zero score, and the failure reason.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryResult {
    pub answer: Option<String>,
    pub score: f64,
    pub failure: Option<QaFailure>,
}

impl QueryResult {
    /// A successful response. An empty answer string is kept as-is.
    pub fn answered(answer: impl Into<String>, score: f64) -> Self {
        Self {
            answer: Some(answer.into()),
            score,
            failure: None,
        }
    }

    pub fn failed(failure: QaFailure) -> Self {
        Self {
            answer: None,
            score: 0.0,
            failure: Some(failure),
        }
    }

    /// The answer text, if present and not blank.
    pub fn answer_text(&self) -> Option<&str> {
        self.answer.as_deref().filter(|a| !a.trim().is_empty())
    }

    /// True when the response carries a non-empty answer with a positive score.
    pub fn is_informative(&self) -> bool {
        self.score > 0.0 && self.answer_text().is_some()
    }

    /// Short label for metrics and logs.
    pub fn outcome_label(&self) -> &'static str {
        match &self.failure {
            None if self.is_informative() => "answered",
            None => "empty",
            Some(QaFailure::MissingCredential) => "missing_credential",
            Some(QaFailure::ServiceUnavailable(_)) => "unavailable",
            Some(QaFailure::Exhausted { .. }) => "exhausted",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_answered_is_informative() {
        let result = QueryResult::answered("Paris", 0.92);
        assert!(result.is_informative());
        assert_eq!(result.answer_text(), Some("Paris"));
        assert_eq!(result.outcome_label(), "answered");
    }

    #[test]
    fn test_empty_answer_is_not_informative() {
        let result = QueryResult::answered("", 0.8);
        assert!(!result.is_informative());
        assert_eq!(result.answer_text(), None);
        assert_eq!(result.outcome_label(), "empty");
    }

    #[test]
    fn test_zero_score_is_not_informative() {
        let result = QueryResult::answered("something", 0.0);
        assert!(!result.is_informative());
    }

    #[test]
    fn test_failed_has_no_answer() {
        let result = QueryResult::failed(QaFailure::MissingCredential);
        assert_eq!(result.answer, None);
        assert_eq!(result.score, 0.0);
        assert_eq!(result.outcome_label(), "missing_credential");
    }

    #[test]
    fn test_failure_display() {
        let failure = QaFailure::Exhausted {
            attempts: 3,
            last_error: "model still loading".to_string(),
        };
        assert_eq!(
            failure.to_string(),
            "Gave up after 3 attempts: model still loading"
        );
    }
}
