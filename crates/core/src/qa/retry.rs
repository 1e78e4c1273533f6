//! Bounded retry around a single remote query.
//!
//! The loop is a small state machine:
//!
//! ```text
//! Attempting(n) ──success──────────────► Succeeded
//!      │  ──503, not loading──────────► FailedPermanent
//!      │  ──503 loading, n < max──────► WaitingForLoad(n)   ──sleep──► Attempting(n+1)
//!      │  ──other error, n < max──────► WaitingAfterError(n) ──sleep──► Attempting(n+1)
//!      └──loading/error, n == max─────► Exhausted
//! ```
//!
//! Every attempt, including those that hit a loading model, counts toward
//! `max_attempts`. No wait happens after the final attempt.

use std::future::Future;
use std::time::Duration;

use tracing::{debug, warn};

use crate::config::RemoteQaConfig;
use crate::metrics::QA_ATTEMPTS_TOTAL;

use super::types::{QaFailure, QueryResult};

/// What one HTTP attempt against the endpoint produced.
#[derive(Debug, Clone, PartialEq)]
pub enum AttemptOutcome {
    /// Parsed answer.
    Success { answer: String, score: f64 },
    /// 503 with a "model is loading" body.
    ModelLoading { estimated_time: Option<f64> },
    /// 503 for any other reason. Not retried.
    Unavailable(String),
    /// Transport error, unexpected status, or unparseable body.
    Failed(String),
}

impl AttemptOutcome {
    fn label(&self) -> &'static str {
        match self {
            AttemptOutcome::Success { .. } => "success",
            AttemptOutcome::ModelLoading { .. } => "loading",
            AttemptOutcome::Unavailable(_) => "unavailable",
            AttemptOutcome::Failed(_) => "error",
        }
    }
}

/// States of the retry loop.
#[derive(Debug, Clone, PartialEq)]
pub enum RetryState {
    Attempting { attempt: u32 },
    WaitingForLoad { attempt: u32, wait: Duration },
    WaitingAfterError { attempt: u32, wait: Duration, error: String },
    Succeeded { answer: String, score: f64 },
    FailedPermanent { reason: String },
    Exhausted { attempts: u32, last_error: String },
}

/// Retry bounds for remote queries.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    /// Cap on a single cold-start wait.
    pub max_loading_wait: Duration,
    /// Fixed wait after a generic failure.
    pub retry_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from_config(&RemoteQaConfig::default())
    }
}

impl RetryPolicy {
    pub fn from_config(config: &RemoteQaConfig) -> Self {
        Self {
            max_attempts: config.max_attempts.max(1),
            max_loading_wait: secs(config.max_loading_wait_secs),
            retry_delay: secs(config.retry_delay_secs),
        }
    }

    /// Wait before retrying a loading model: the endpoint's estimate, capped.
    /// Without an estimate the cap is used.
    pub fn loading_wait(&self, estimated_time: Option<f64>) -> Duration {
        match estimated_time {
            Some(estimate) => secs(estimate).min(self.max_loading_wait),
            None => self.max_loading_wait,
        }
    }

    /// Transition taken after attempt number `attempt` (1-based) produced `outcome`.
    pub fn next_state(&self, attempt: u32, outcome: AttemptOutcome) -> RetryState {
        let last = attempt >= self.max_attempts;
        match outcome {
            AttemptOutcome::Success { answer, score } => RetryState::Succeeded { answer, score },
            AttemptOutcome::Unavailable(reason) => RetryState::FailedPermanent { reason },
            AttemptOutcome::ModelLoading { .. } if last => RetryState::Exhausted {
                attempts: attempt,
                last_error: "model still loading".to_string(),
            },
            AttemptOutcome::ModelLoading { estimated_time } => RetryState::WaitingForLoad {
                attempt,
                wait: self.loading_wait(estimated_time),
            },
            AttemptOutcome::Failed(error) if last => RetryState::Exhausted {
                attempts: attempt,
                last_error: error,
            },
            AttemptOutcome::Failed(error) => RetryState::WaitingAfterError {
                attempt,
                wait: self.retry_delay,
                error,
            },
        }
    }

    /// Drive the state machine, calling `attempt_fn` with the 1-based attempt number.
    pub async fn run<F, Fut>(&self, mut attempt_fn: F) -> QueryResult
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = AttemptOutcome>,
    {
        let mut state = RetryState::Attempting { attempt: 1 };
        loop {
            state = match state {
                RetryState::Attempting { attempt } => {
                    let outcome = attempt_fn(attempt).await;
                    QA_ATTEMPTS_TOTAL
                        .with_label_values(&[outcome.label()])
                        .inc();
                    self.next_state(attempt, outcome)
                }
                RetryState::WaitingForLoad { attempt, wait } => {
                    debug!(
                        attempt,
                        wait_secs = wait.as_secs_f64(),
                        "Model loading, waiting before retry"
                    );
                    tokio::time::sleep(wait).await;
                    RetryState::Attempting {
                        attempt: attempt + 1,
                    }
                }
                RetryState::WaitingAfterError {
                    attempt,
                    wait,
                    error,
                } => {
                    warn!(attempt, error = %error, "Remote QA attempt failed, retrying");
                    tokio::time::sleep(wait).await;
                    RetryState::Attempting {
                        attempt: attempt + 1,
                    }
                }
                RetryState::Succeeded { answer, score } => {
                    return QueryResult::answered(answer, score);
                }
                RetryState::FailedPermanent { reason } => {
                    warn!(reason = %reason, "Remote QA service unavailable, not retrying");
                    return QueryResult::failed(QaFailure::ServiceUnavailable(reason));
                }
                RetryState::Exhausted {
                    attempts,
                    last_error,
                } => {
                    warn!(attempts, last_error = %last_error, "Remote QA attempts exhausted");
                    return QueryResult::failed(QaFailure::Exhausted {
                        attempts,
                        last_error,
                    });
                }
            };
        }
    }
}

fn secs(value: f64) -> Duration {
    Duration::try_from_secs_f64(value).unwrap_or(Duration::ZERO)
}
