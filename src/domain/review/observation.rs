//! Free-text notes managers keep about their team.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    DiaryEntryId, ObservationId, ReviewId, Timestamp, UserId, ValidationError,
};

/// A note attached to a review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyObservation {
    pub id: ObservationId,
    pub review_id: ReviewId,
    pub text: String,
    pub author_id: UserId,
    pub created_at: Timestamp,
}

impl WeeklyObservation {
    pub fn new(review_id: ReviewId, text: &str, author_id: UserId) -> Result<Self, ValidationError> {
        Ok(Self {
            id: ObservationId::new(),
            review_id,
            text: non_blank("text", text)?,
            author_id,
            created_at: Timestamp::now(),
        })
    }
}

/// A diary note about an employee, filed under their current review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiaryEntry {
    pub id: DiaryEntryId,
    pub review_id: ReviewId,
    pub text: String,
    pub employee_id: UserId,
    pub employee_name: String,
    pub author_id: UserId,
    pub author_name: String,
    pub created_at: Timestamp,
}

impl DiaryEntry {
    pub fn new(
        review_id: ReviewId,
        text: &str,
        employee: (UserId, String),
        author: (UserId, String),
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            id: DiaryEntryId::new(),
            review_id,
            text: non_blank("text", text)?,
            employee_id: employee.0,
            employee_name: employee.1,
            author_id: author.0,
            author_name: author.1,
            created_at: Timestamp::now(),
        })
    }
}

fn non_blank(field: &str, text: &str) -> Result<String, ValidationError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::empty_field(field));
    }
    Ok(trimmed.to_string())
}
