//! Review feedback generator port.
//!
//! Drafts the text a manager sends to the employee from the scored items. The
//! draft is only returned to the caller; nothing is stored.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::DomainError;

/// One scored template item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackItem {
    pub text: String,
    pub score: u8,
}

/// Input for a feedback draft.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackRequest {
    pub items: Vec<FeedbackItem>,
    /// Private notes used as context only.
    pub manager_observations: Option<String>,
}

#[async_trait]
pub trait ReviewFeedbackGenerator: Send + Sync {
    /// Generates a single-paragraph feedback draft.
    ///
    /// # Errors
    ///
    /// - `FeedbackGeneratorUnavailable` when no provider is configured
    /// - `FeedbackGeneratorError` when the provider call fails
    async fn generate(&self, request: &FeedbackRequest) -> Result<String, DomainError>;
}
