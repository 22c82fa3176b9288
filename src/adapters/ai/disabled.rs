//! Feedback generator used when no provider is configured.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::{FeedbackRequest, ReviewFeedbackGenerator};

#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledFeedbackGenerator;

#[async_trait]
impl ReviewFeedbackGenerator for DisabledFeedbackGenerator {
    async fn generate(&self, _request: &FeedbackRequest) -> Result<String, DomainError> {
        Err(DomainError::new(
            ErrorCode::FeedbackGeneratorUnavailable,
            "Feedback generation is not configured",
        ))
    }
}
