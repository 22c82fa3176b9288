//! Error responses shared by every HTTP area.
//!
//! Each application error type is mapped to a status code through its
//! `ErrorCode`. Infrastructure failures are logged and returned without their
//! internal message.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::kpi::KpiError;
use crate::domain::reports::ReportError;
use crate::domain::review::ReviewError;

/// Standard error response.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            code: "BAD_REQUEST".to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            code: "INTERNAL_ERROR".to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}

/// HTTP status for an error code.
pub fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::ValidationFailed
        | ErrorCode::EmptyField
        | ErrorCode::OutOfRange
        | ErrorCode::InvalidFormat => StatusCode::BAD_REQUEST,

        ErrorCode::ReviewNotFound
        | ErrorCode::TemplateNotFound
        | ErrorCode::ObservationNotFound
        | ErrorCode::DepartmentNotFound
        | ErrorCode::EmployeeNotFound
        | ErrorCode::KpiModelNotFound
        | ErrorCode::AssessmentNotFound => StatusCode::NOT_FOUND,

        ErrorCode::InvalidStateTransition
        | ErrorCode::ReviewCompleted
        | ErrorCode::DuplicateReview => StatusCode::CONFLICT,

        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,

        ErrorCode::FeedbackGeneratorUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::FeedbackGeneratorError => StatusCode::BAD_GATEWAY,

        ErrorCode::DatabaseError | ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Builds the response for `code`, hiding the message of server-side failures.
pub fn error_response(code: ErrorCode, message: String) -> Response {
    let status = status_for(code);
    if status.is_server_error() && status != StatusCode::SERVICE_UNAVAILABLE {
        tracing::error!(code = %code, error = %message, "request failed");
        return (status, Json(ErrorResponse::internal("Internal server error"))).into_response();
    }
    (status, Json(ErrorResponse::new(code, message))).into_response()
}

/// 400 for a malformed path or query value.
pub fn invalid_param(name: &str) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse::bad_request(format!("Invalid {}", name))),
    )
        .into_response()
}

/// Parses a path or query value, answering 400 when it is malformed.
pub fn parse_param<T: std::str::FromStr>(name: &str, raw: &str) -> Result<T, Response> {
    raw.parse().map_err(|_| invalid_param(name))
}

/// Like [`parse_param`] for optional query values; blank counts as absent.
pub fn parse_optional<T: std::str::FromStr>(
    name: &str,
    raw: Option<&str>,
) -> Result<Option<T>, Response> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        Some(raw) => parse_param(name, raw).map(Some),
        None => Ok(None),
    }
}

pub fn handle_review_error(error: ReviewError) -> Response {
    error_response(error.code(), error.message())
}

pub fn handle_kpi_error(error: KpiError) -> Response {
    error_response(error.code(), error.message())
}

pub fn handle_report_error(error: ReportError) -> Response {
    error_response(error.code(), error.message())
}

pub fn handle_domain_error(error: DomainError) -> Response {
    error_response(error.code, error.message)
}
