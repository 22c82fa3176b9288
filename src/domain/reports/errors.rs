//! Report and bonus-parameter error types.

use crate::domain::foundation::{DomainError, ErrorCode, UserId, ValidationError};

/// Errors raised by reports and bonus parameter maintenance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportError {
    /// Employee was not found in the org directory.
    EmployeeNotFound(UserId),
    /// Caller is not allowed to see or change this data.
    Forbidden,
    /// Validation failed.
    ValidationFailed { field: String, message: String },
    /// Infrastructure error.
    Infrastructure(String),
}

impl ReportError {
    pub fn forbidden() -> Self {
        ReportError::Forbidden
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        ReportError::Infrastructure(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            ReportError::EmployeeNotFound(_) => ErrorCode::EmployeeNotFound,
            ReportError::Forbidden => ErrorCode::Forbidden,
            ReportError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            ReportError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    pub fn message(&self) -> String {
        match self {
            ReportError::EmployeeNotFound(id) => format!("Employee not found: {}", id),
            ReportError::Forbidden => "Permission denied".to_string(),
            ReportError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            ReportError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for ReportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ReportError {}

impl From<DomainError> for ReportError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::Forbidden => ReportError::Forbidden,
            ErrorCode::ValidationFailed
            | ErrorCode::EmptyField
            | ErrorCode::OutOfRange
            | ErrorCode::InvalidFormat => ReportError::ValidationFailed {
                field: err.field().unwrap_or("unknown").to_string(),
                message: err.message,
            },
            _ => ReportError::Infrastructure(err.to_string()),
        }
    }
}

impl From<ValidationError> for ReportError {
    fn from(err: ValidationError) -> Self {
        ReportError::ValidationFailed {
            field: err.field().to_string(),
            message: err.to_string(),
        }
    }
}
