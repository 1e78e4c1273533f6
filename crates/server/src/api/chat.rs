//! Chat endpoint.

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use faqbot_core::AnswerResolver;

use super::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    /// The user's message. Missing and null are treated as empty.
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub response: String,
}

/// POST /chat
///
/// Answer a message from the FAQ, the remote QA model, or the fallback text.
/// An empty message is rejected with 400 and triggers no remote calls, not
/// even the warm-up. The first valid message warms the remote model once.
pub async fn chat(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, ApiError> {
    let Json(body) = payload?;
    let message = body.message.unwrap_or_default();
    AnswerResolver::check_message(&message)?;

    if !state.warmup().is_done() {
        state.warmup().ensure_warm(state.qa_client()).await;
    }

    let resolution = state.resolver().resolve(&message).await?;

    Ok(Json(ChatResponse {
        response: resolution.response,
    }))
}
