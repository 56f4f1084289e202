// src/server/error.rs
// HTTP-level errors: rendered as a single-key `{"error": ...}` body

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;

/// Shown when the model reply is not a JSON object
pub const UNFORMATTED_REPLY_MESSAGE: &str = "AI failed to format JSON. Try again.";

#[derive(Debug)]
pub struct ApiError {
    pub message: String,
    pub status_code: StatusCode,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::custom(StatusCode::BAD_REQUEST, message)
    }

    /// The model answered, but not with a JSON object
    pub fn unformatted_reply() -> Self {
        Self::custom(StatusCode::INTERNAL_SERVER_ERROR, UNFORMATTED_REPLY_MESSAGE)
    }

    pub fn custom(status_code: StatusCode, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status_code,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status_code, Json(json!({ "error": self.message }))).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
