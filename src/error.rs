// src/error.rs
//! Boundary errors and their HTTP mapping.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum ApiError {
    /// Request failed validation (empty text, empty batch, ...).
    InvalidInput(String),
    /// Anything the pipeline could not recover from. Detail is a short message only.
    Internal(String),
}

impl ApiError {
    pub fn invalid(detail: impl Into<String>) -> Self {
        Self::InvalidInput(detail.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidInput(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::InvalidInput(detail) => write!(f, "invalid input: {detail}"),
            ApiError::Internal(detail) => write!(f, "internal error: {detail}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (error, detail) = match &self {
            ApiError::InvalidInput(d) => ("invalid input", d.as_str()),
            ApiError::Internal(d) => ("internal error", d.as_str()),
        };
        let body = Json(json!({ "error": error, "detail": detail }));
        (self.status(), body).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(value: JsonRejection) -> Self {
        Self::InvalidInput(value.body_text())
    }
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(value: tokio::task::JoinError) -> Self {
        if value.is_panic() {
            Self::Internal("analysis task panicked".to_string())
        } else {
            Self::Internal("analysis task cancelled".to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses() {
        assert_eq!(ApiError::invalid("x").status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            ApiError::Internal("boom".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn display_includes_detail() {
        assert_eq!(
            ApiError::invalid("text must not be empty").to_string(),
            "invalid input: text must not be empty"
        );
    }
}
