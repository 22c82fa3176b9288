//! Review-specific error types.

use crate::domain::foundation::{
    DomainError, ErrorCode, ObservationId, ReviewId, TemplateId, UserId, ValidationError,
};

/// Errors raised by review, template and observation operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewError {
    /// Review was not found.
    NotFound(ReviewId),
    /// Template was not found.
    TemplateNotFound(TemplateId),
    /// Observation was not found.
    ObservationNotFound(ObservationId),
    /// Employee was not found in the org directory.
    EmployeeNotFound(UserId),
    /// Caller is not allowed to perform the operation.
    Forbidden,
    /// Operation is not valid in the review's current status.
    InvalidState(String),
    /// The review is completed and can no longer change.
    AlreadyCompleted,
    /// Validation failed.
    ValidationFailed { field: String, message: String },
    /// The feedback generator is not configured.
    FeedbackUnavailable,
    /// The feedback generator failed.
    FeedbackFailed(String),
    /// Infrastructure error.
    Infrastructure(String),
}

impl ReviewError {
    pub fn not_found(id: ReviewId) -> Self {
        ReviewError::NotFound(id)
    }

    pub fn forbidden() -> Self {
        ReviewError::Forbidden
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        ReviewError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        ReviewError::Infrastructure(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            ReviewError::NotFound(_) => ErrorCode::ReviewNotFound,
            ReviewError::TemplateNotFound(_) => ErrorCode::TemplateNotFound,
            ReviewError::ObservationNotFound(_) => ErrorCode::ObservationNotFound,
            ReviewError::EmployeeNotFound(_) => ErrorCode::EmployeeNotFound,
            ReviewError::Forbidden => ErrorCode::Forbidden,
            ReviewError::InvalidState(_) => ErrorCode::InvalidStateTransition,
            ReviewError::AlreadyCompleted => ErrorCode::ReviewCompleted,
            ReviewError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            ReviewError::FeedbackUnavailable => ErrorCode::FeedbackGeneratorUnavailable,
            ReviewError::FeedbackFailed(_) => ErrorCode::FeedbackGeneratorError,
            ReviewError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    pub fn message(&self) -> String {
        match self {
            ReviewError::NotFound(id) => format!("Review not found: {}", id),
            ReviewError::TemplateNotFound(id) => format!("Template not found: {}", id),
            ReviewError::ObservationNotFound(id) => format!("Observation not found: {}", id),
            ReviewError::EmployeeNotFound(id) => format!("Employee not found: {}", id),
            ReviewError::Forbidden => "Permission denied".to_string(),
            ReviewError::InvalidState(msg) => format!("Invalid state: {}", msg),
            ReviewError::AlreadyCompleted => "Review is already completed".to_string(),
            ReviewError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            ReviewError::FeedbackUnavailable => {
                "Feedback generation is not configured".to_string()
            }
            ReviewError::FeedbackFailed(msg) => format!("Feedback generation failed: {}", msg),
            ReviewError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for ReviewError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ReviewError {}

impl From<DomainError> for ReviewError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::Forbidden => ReviewError::Forbidden,
            ErrorCode::ReviewCompleted => ReviewError::AlreadyCompleted,
            ErrorCode::InvalidStateTransition => ReviewError::InvalidState(err.message),
            ErrorCode::ValidationFailed
            | ErrorCode::EmptyField
            | ErrorCode::OutOfRange
            | ErrorCode::InvalidFormat => ReviewError::ValidationFailed {
                field: err.field().unwrap_or("unknown").to_string(),
                message: err.message,
            },
            ErrorCode::FeedbackGeneratorUnavailable => ReviewError::FeedbackUnavailable,
            ErrorCode::FeedbackGeneratorError => ReviewError::FeedbackFailed(err.message),
            _ => ReviewError::Infrastructure(err.to_string()),
        }
    }
}

impl From<ValidationError> for ReviewError {
    fn from(err: ValidationError) -> Self {
        ReviewError::ValidationFailed {
            field: err.field().to_string(),
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_validation_keeps_field() {
        let err: ReviewError =
            DomainError::validation("feedback_for_employee", "too short").into();
        assert_eq!(
            err,
            ReviewError::ValidationFailed {
                field: "feedback_for_employee".into(),
                message: "too short".into()
            }
        );
    }

    #[test]
    fn completed_maps_to_its_own_variant() {
        let err: ReviewError = DomainError::new(ErrorCode::ReviewCompleted, "done").into();
        assert_eq!(err, ReviewError::AlreadyCompleted);
        assert_eq!(err.code(), ErrorCode::ReviewCompleted);
    }

    #[test]
    fn database_errors_become_infrastructure() {
        let err: ReviewError = DomainError::new(ErrorCode::DatabaseError, "down").into();
        assert!(matches!(err, ReviewError::Infrastructure(_)));
    }
}
