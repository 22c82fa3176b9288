//! KPI-specific error types.

use crate::domain::foundation::{
    DepartmentId, DomainError, ErrorCode, KpiAssessmentId, ValidationError,
};

/// Errors raised by KPI model and assessment operations.
#[derive(Debug, Clone, PartialEq)]
pub enum KpiError {
    /// No KPI model is configured for the department.
    ModelNotFound(DepartmentId),
    /// Assessment was not found.
    AssessmentNotFound(KpiAssessmentId),
    /// Department was not found.
    DepartmentNotFound(DepartmentId),
    /// Caller lacks the capability.
    Forbidden,
    /// Validation failed.
    ValidationFailed { field: String, message: String },
    /// Infrastructure error.
    Infrastructure(String),
}

impl KpiError {
    pub fn forbidden() -> Self {
        KpiError::Forbidden
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        KpiError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        KpiError::Infrastructure(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            KpiError::ModelNotFound(_) => ErrorCode::KpiModelNotFound,
            KpiError::AssessmentNotFound(_) => ErrorCode::AssessmentNotFound,
            KpiError::DepartmentNotFound(_) => ErrorCode::DepartmentNotFound,
            KpiError::Forbidden => ErrorCode::Forbidden,
            KpiError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            KpiError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    pub fn message(&self) -> String {
        match self {
            KpiError::ModelNotFound(id) => format!("No KPI model for department {}", id),
            KpiError::AssessmentNotFound(id) => format!("KPI assessment not found: {}", id),
            KpiError::DepartmentNotFound(id) => format!("Department not found: {}", id),
            KpiError::Forbidden => "Permission denied".to_string(),
            KpiError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            KpiError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for KpiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for KpiError {}

impl From<DomainError> for KpiError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::Forbidden => KpiError::Forbidden,
            ErrorCode::ValidationFailed
            | ErrorCode::EmptyField
            | ErrorCode::OutOfRange
            | ErrorCode::InvalidFormat => KpiError::ValidationFailed {
                field: err.field().unwrap_or("unknown").to_string(),
                message: err.message,
            },
            _ => KpiError::Infrastructure(err.to_string()),
        }
    }
}

impl From<ValidationError> for KpiError {
    fn from(err: ValidationError) -> Self {
        KpiError::ValidationFailed {
            field: err.field().to_string(),
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn database_errors_become_infrastructure() {
        let err: KpiError = DomainError::new(ErrorCode::DatabaseError, "boom").into();
        assert!(matches!(err, KpiError::Infrastructure(_)));
        assert_eq!(err.code(), ErrorCode::DatabaseError);
    }

    #[test]
    fn validation_keeps_field_name() {
        let err: KpiError = ValidationError::empty_field("indicators").into();
        match err {
            KpiError::ValidationFailed { field, .. } => assert_eq!(field, "indicators"),
            other => panic!("unexpected {:?}", other),
        }
    }
}
