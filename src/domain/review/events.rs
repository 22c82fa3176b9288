//! Review domain events.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{domain_event, EventId, Period, ReviewId, Timestamp, UserId};

/// Published after a batch of reviews was opened.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewsCreated {
    pub event_id: EventId,
    pub created_by: UserId,
    pub period: Period,
    pub review_ids: Vec<ReviewId>,
    pub skipped: usize,
    pub created_at: Timestamp,
}

domain_event!(
    ReviewsCreated,
    event_type = "review.batch_created.v1",
    aggregate_id = created_by,
    aggregate_type = "ReviewBatch",
    occurred_at = created_at,
    event_id = event_id
);

/// Published when a manager submits a review for approval.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewSubmitted {
    pub event_id: EventId,
    pub review_id: ReviewId,
    pub employee_id: UserId,
    pub average_score: f64,
    pub submitted_by: UserId,
    pub submitted_at: Timestamp,
}

domain_event!(
    ReviewSubmitted,
    event_type = "review.submitted.v1",
    aggregate_id = review_id,
    aggregate_type = "PerformanceReview",
    occurred_at = submitted_at,
    event_id = event_id
);

/// Published when an administrator sends a review back.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewAdjustmentRequested {
    pub event_id: EventId,
    pub review_id: ReviewId,
    pub manager_id: UserId,
    pub requested_by: UserId,
    pub requested_at: Timestamp,
}

domain_event!(
    ReviewAdjustmentRequested,
    event_type = "review.adjustment_requested.v1",
    aggregate_id = review_id,
    aggregate_type = "PerformanceReview",
    occurred_at = requested_at,
    event_id = event_id
);

/// Published when an administrator approves a review.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewApproved {
    pub event_id: EventId,
    pub review_id: ReviewId,
    pub employee_id: UserId,
    pub approved_by: UserId,
    pub approved_at: Timestamp,
}

domain_event!(
    ReviewApproved,
    event_type = "review.approved.v1",
    aggregate_id = review_id,
    aggregate_type = "PerformanceReview",
    occurred_at = approved_at,
    event_id = event_id
);

/// Published after a review and its observations were removed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewDeleted {
    pub event_id: EventId,
    pub review_id: ReviewId,
    pub deleted_by: UserId,
    pub deleted_at: Timestamp,
}

domain_event!(
    ReviewDeleted,
    event_type = "review.deleted.v1",
    aggregate_id = review_id,
    aggregate_type = "PerformanceReview",
    occurred_at = deleted_at,
    event_id = event_id
);
