//! API error type and its JSON rendering.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use faqbot_core::ResolveError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("No message provided")]
    NoMessage,

    #[error("Invalid request body: {0}")]
    InvalidBody(String),
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NoMessage | ApiError::InvalidBody(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

impl From<ResolveError> for ApiError {
    fn from(err: ResolveError) -> Self {
        match err {
            ResolveError::EmptyMessage => ApiError::NoMessage,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(err: JsonRejection) -> Self {
        ApiError::InvalidBody(err.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_message_text_matches_wire_contract() {
        assert_eq!(ApiError::NoMessage.to_string(), "No message provided");
    }

    #[test]
    fn test_resolve_error_maps_to_bad_request() {
        let err = ApiError::from(ResolveError::EmptyMessage);
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert!(matches!(err, ApiError::NoMessage));
    }
}
