use algoarena_api_types::ErrorResponse;
use algoarena_core::ValidationError;
use algoarena_core::domain::{DomainError, JudgeError};
use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::{error, warn};

use crate::service::ServiceError;

/// Error returned by every handler, rendered as `{error, code}`.
#[derive(Debug)]
pub struct ApiError {
    message: String,
    code: &'static str,
    status: StatusCode,
}

impl ApiError {
    fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code,
            status,
        }
    }

    pub fn unauthenticated() -> Self {
        Self::new(
            StatusCode::UNAUTHORIZED,
            "UNAUTHENTICATED",
            "Missing or malformed caller identity",
        )
    }

    pub fn invalid_id(raw: &str) -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            "INVALID_ID",
            format!("Invalid id: {raw}"),
        )
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Field(domain) => {
                Self::new(StatusCode::BAD_REQUEST, "INVALID_FIELD", domain.to_string())
            }
            ServiceError::Validation(validation) => Self::from(validation),
            ServiceError::NotFound(what) => Self::new(
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                format!("{} not found", capitalize(what)),
            ),
            ServiceError::Internal(err) => {
                error!(error = ?err, "request failed");
                Self::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "Internal server error",
                )
            }
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self::from(ServiceError::Field(err))
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        let message = err.to_string();
        match err {
            ValidationError::UnsupportedLanguage(_) => {
                Self::new(StatusCode::BAD_REQUEST, "UNSUPPORTED_LANGUAGE", message)
            }
            ValidationError::NoTokensReceived { .. }
            | ValidationError::ReferenceSolutionFailed { .. } => Self::new(
                StatusCode::BAD_REQUEST,
                "REFERENCE_SOLUTION_REJECTED",
                message,
            ),
            ValidationError::Judge { source, .. } => {
                let code = match source {
                    JudgeError::UnsupportedLanguage(_) => "UNSUPPORTED_LANGUAGE",
                    JudgeError::Unavailable(_) => "JUDGE_UNAVAILABLE",
                    JudgeError::Timeout { .. } => "JUDGE_TIMEOUT",
                    JudgeError::Protocol(_) => "JUDGE_PROTOCOL_ERROR",
                };
                warn!(error = %message, "judge failure during validation");
                Self::new(StatusCode::BAD_REQUEST, code, message)
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "INVALID_BODY", rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse {
            error: self.message,
            code: self.code.to_string(),
        });
        (self.status, body).into_response()
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
