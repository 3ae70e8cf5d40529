//! Unified error handling
//!
//! `ApiError` is what handlers return; `ClientError` is what the wizard's
//! HTTP client returns.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::domain::ValidationErrors;
use crate::services::{StoreError, SubmissionError};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),

    #[error("Database error")]
    Database(#[from] sqlx::Error),
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub code: String,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<ValidationErrors>,
}

impl ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) | Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            Self::Internal(_) | Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::BadRequest(_) => "BAD_REQUEST",
            Self::Conflict(_) => "CONFLICT",
            Self::PayloadTooLarge(_) => "PAYLOAD_TOO_LARGE",
            Self::Validation(_) => "VALIDATION_FAILED",
            Self::Internal(_) => "INTERNAL_ERROR",
            Self::Database(_) => "DATABASE_ERROR",
        }
    }

    fn public_message(&self) -> String {
        match self {
            Self::BadRequest(msg) | Self::Conflict(msg) | Self::PayloadTooLarge(msg) => {
                msg.clone()
            }
            Self::Validation(_) => "Please fix all errors before submitting".to_string(),
            // Don't leak internal error details
            Self::Internal(_) | Self::Database(_) => "An internal error occurred".to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            Self::Internal(e) => {
                tracing::error!(error = ?e, "Internal server error");
            }
            Self::Database(e) => {
                tracing::error!(error = ?e, "Database error");
            }
            _ => {
                tracing::warn!(error = %self, "API error");
            }
        }

        let status = self.status_code();
        let code = self.error_code().to_string();
        let error = self.public_message();
        let fields = match self {
            Self::Validation(errors) => Some(errors),
            _ => None,
        };
        let body = ErrorResponse {
            success: false,
            code,
            error,
            fields,
        };

        (status, Json(body)).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateUsername(username) => {
                Self::Conflict(format!("Username '{username}' is already taken"))
            }
            StoreError::Database(e) => Self::Database(e),
            StoreError::InvalidRow(msg) => Self::Internal(anyhow::anyhow!(msg)),
        }
    }
}

impl From<SubmissionError> for ApiError {
    fn from(err: SubmissionError) -> Self {
        match err {
            SubmissionError::Store(e) => e.into(),
            SubmissionError::MissingField(field) => {
                Self::BadRequest(format!("Field '{field}' is required"))
            }
            SubmissionError::Storage(e) => {
                Self::Internal(anyhow::Error::new(e).context("Failed to store profile photo"))
            }
            SubmissionError::Hashing(msg) => {
                Self::Internal(anyhow::anyhow!("Failed to hash password: {msg}"))
            }
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Errors from the HTTP client used by the wizard.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid API URL: {0}")]
    InvalidUrl(String),

    #[error("API returned {status}: {message}")]
    Rejected { status: u16, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Field;

    #[test]
    fn statuses_follow_the_variant() {
        assert_eq!(
            ApiError::BadRequest("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::PayloadTooLarge("x".into()).status_code(),
            StatusCode::PAYLOAD_TOO_LARGE
        );
        assert_eq!(
            ApiError::from(StoreError::DuplicateUsername("abcd".into())).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ApiError::Internal(anyhow::anyhow!("secret detail")).public_message(),
            "An internal error occurred"
        );
    }

    #[test]
    fn incomplete_submission_is_a_bad_request() {
        let err = ApiError::from(SubmissionError::MissingField(Field::Profession));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.error_code(), "BAD_REQUEST");
        assert_eq!(err.public_message(), "Field 'profession' is required");
    }

    #[test]
    fn validation_errors_keep_their_fields() {
        let mut errors = ValidationErrors::new();
        errors.insert(Field::City, "City is required");
        let response = ApiError::Validation(errors).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
