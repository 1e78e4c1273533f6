//! Remote question answering.
//!
//! A [`QaClient`] scores one context passage against a question. The
//! production implementation, [`HuggingFaceQaClient`], talks to a hosted
//! inference endpoint and wraps every call in a bounded [`RetryPolicy`]:
//!
//! - 503 + "loading": wait `min(estimated_time, cap)` and retry
//! - 503 otherwise: give up immediately
//! - anything else that fails: wait a fixed delay and retry
//!
//! Failures never propagate as errors; they come back as a [`QueryResult`]
//! with no answer, a zero score, and a [`QaFailure`] reason.

mod huggingface;
mod retry;
mod traits;
mod types;

pub use huggingface::HuggingFaceQaClient;
pub use retry::{AttemptOutcome, RetryPolicy, RetryState};
pub use traits::QaClient;
pub use types::{QaFailure, QueryResult};
