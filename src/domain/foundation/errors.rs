//! Error types for the domain layer.

use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use thiserror::Error;

/// Errors that occur during value object construction.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Field '{field}' must be between {min} and {max}, got {actual}")]
    OutOfRange {
        field: String,
        min: f64,
        max: f64,
        actual: f64,
    },

    #[error("Field '{field}' must have at least {min} characters")]
    TooShort { field: String, min: usize },

    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Creates an empty field validation error.
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField { field: field.into() }
    }

    /// Creates an out of range validation error.
    pub fn out_of_range(field: impl Into<String>, min: f64, max: f64, actual: f64) -> Self {
        ValidationError::OutOfRange {
            field: field.into(),
            min,
            max,
            actual,
        }
    }

    /// Creates a minimum length validation error.
    pub fn too_short(field: impl Into<String>, min: usize) -> Self {
        ValidationError::TooShort {
            field: field.into(),
            min,
        }
    }

    /// Creates an invalid format validation error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Name of the field that failed validation.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::EmptyField { field }
            | ValidationError::OutOfRange { field, .. }
            | ValidationError::TooShort { field, .. }
            | ValidationError::InvalidFormat { field, .. } => field,
        }
    }

    /// Trims `value` and rejects it when shorter than `min` characters.
    pub fn require_min_chars(
        field: &str,
        value: &str,
        min: usize,
    ) -> Result<String, ValidationError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::empty_field(field));
        }
        if trimmed.chars().count() < min {
            return Err(ValidationError::too_short(field, min));
        }
        Ok(trimmed.to_string())
    }
}

/// Error codes organized by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Validation errors
    ValidationFailed,
    EmptyField,
    OutOfRange,
    InvalidFormat,

    // Not found errors
    ReviewNotFound,
    TemplateNotFound,
    ObservationNotFound,
    DepartmentNotFound,
    EmployeeNotFound,
    KpiModelNotFound,
    AssessmentNotFound,

    // State errors
    InvalidStateTransition,
    ReviewCompleted,
    DuplicateReview,

    // Authorization errors
    Unauthorized,
    Forbidden,

    // Collaborator errors
    FeedbackGeneratorError,
    FeedbackGeneratorUnavailable,

    // Infrastructure errors
    DatabaseError,
    InternalError,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::ValidationFailed => "VALIDATION_FAILED",
            ErrorCode::EmptyField => "EMPTY_FIELD",
            ErrorCode::OutOfRange => "OUT_OF_RANGE",
            ErrorCode::InvalidFormat => "INVALID_FORMAT",
            ErrorCode::ReviewNotFound => "REVIEW_NOT_FOUND",
            ErrorCode::TemplateNotFound => "TEMPLATE_NOT_FOUND",
            ErrorCode::ObservationNotFound => "OBSERVATION_NOT_FOUND",
            ErrorCode::DepartmentNotFound => "DEPARTMENT_NOT_FOUND",
            ErrorCode::EmployeeNotFound => "EMPLOYEE_NOT_FOUND",
            ErrorCode::KpiModelNotFound => "KPI_MODEL_NOT_FOUND",
            ErrorCode::AssessmentNotFound => "ASSESSMENT_NOT_FOUND",
            ErrorCode::InvalidStateTransition => "INVALID_STATE_TRANSITION",
            ErrorCode::ReviewCompleted => "REVIEW_COMPLETED",
            ErrorCode::DuplicateReview => "DUPLICATE_REVIEW",
            ErrorCode::Unauthorized => "UNAUTHORIZED",
            ErrorCode::Forbidden => "FORBIDDEN",
            ErrorCode::FeedbackGeneratorError => "FEEDBACK_GENERATOR_ERROR",
            ErrorCode::FeedbackGeneratorUnavailable => "FEEDBACK_GENERATOR_UNAVAILABLE",
            ErrorCode::DatabaseError => "DATABASE_ERROR",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        };
        write!(f, "{}", s)
    }
}

/// Standard domain error with code, message, and optional details.
#[derive(Debug, Clone)]
pub struct DomainError {
    pub code: ErrorCode,
    pub message: String,
    pub details: HashMap<String, String>,
}

impl DomainError {
    /// Creates a new domain error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: HashMap::new(),
        }
    }

    /// Creates a validation error for a specific field.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::ValidationFailed,
            message: message.into(),
            details: HashMap::new(),
        }
        .with_detail("field", field.into())
    }

    /// Adds a detail to the error.
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }

    /// Returns the offending field for validation errors.
    pub fn field(&self) -> Option<&str> {
        self.details.get("field").map(String::as_str)
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl Error for DomainError {}

impl From<ValidationError> for DomainError {
    fn from(err: ValidationError) -> Self {
        let code = match &err {
            ValidationError::EmptyField { .. } => ErrorCode::EmptyField,
            ValidationError::OutOfRange { .. } => ErrorCode::OutOfRange,
            ValidationError::TooShort { .. } => ErrorCode::ValidationFailed,
            ValidationError::InvalidFormat { .. } => ErrorCode::InvalidFormat,
        };
        DomainError::new(code, err.to_string()).with_detail("field", err.field())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_empty_field_displays_correctly() {
        let err = ValidationError::empty_field("feedback_for_employee");
        assert_eq!(
            format!("{}", err),
            "Field 'feedback_for_employee' cannot be empty"
        );
    }

    #[test]
    fn validation_error_out_of_range_displays_correctly() {
        let err = ValidationError::out_of_range("score", 0.0, 10.0, 11.0);
        assert_eq!(
            format!("{}", err),
            "Field 'score' must be between 0 and 10, got 11"
        );
    }

    #[test]
    fn require_min_chars_trims_before_counting() {
        assert!(ValidationError::require_min_chars("name", "  ab  ", 3).is_err());
        assert_eq!(
            ValidationError::require_min_chars("name", "  abc ", 3).unwrap(),
            "abc"
        );
    }

    #[test]
    fn require_min_chars_counts_characters_not_bytes() {
        // "Ótimo" is five characters but six bytes.
        assert!(ValidationError::require_min_chars("text", "Ótimo", 5).is_ok());
        assert!(ValidationError::require_min_chars("text", "Ótim", 5).is_err());
    }

    #[test]
    fn require_min_chars_reports_blank_as_empty() {
        let err = ValidationError::require_min_chars("text", "   ", 3).unwrap_err();
        assert!(matches!(err, ValidationError::EmptyField { .. }));
    }

    #[test]
    fn domain_error_displays_code_and_message() {
        let err = DomainError::new(ErrorCode::ReviewNotFound, "Review not found");
        assert_eq!(format!("{}", err), "[REVIEW_NOT_FOUND] Review not found");
    }

    #[test]
    fn validation_converts_into_domain_error_with_field() {
        let err: DomainError = ValidationError::too_short("feedback", 20).into();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert_eq!(err.field(), Some("feedback"));
    }

    #[test]
    fn domain_error_validation_sets_field_detail() {
        let err = DomainError::validation("period", "bad period");
        assert_eq!(err.field(), Some("period"));
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }
}
