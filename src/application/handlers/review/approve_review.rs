//! ApproveReviewHandler - Administrator completes a submitted review.

use std::sync::Arc;

use crate::domain::foundation::{CommandMetadata, EventId, ReviewId, Timestamp};
use crate::domain::review::{PerformanceReview, ReviewApproved, ReviewError};
use crate::ports::{EventPublisher, ReviewRepository};

use super::super::publish_event;

/// Command to approve a review.
#[derive(Debug, Clone)]
pub struct ApproveReviewCommand {
    pub review_id: ReviewId,
}

/// Handler for review approval.
pub struct ApproveReviewHandler {
    reviews: Arc<dyn ReviewRepository>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl ApproveReviewHandler {
    pub fn new(
        reviews: Arc<dyn ReviewRepository>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            reviews,
            event_publisher,
        }
    }

    pub async fn handle(
        &self,
        cmd: ApproveReviewCommand,
        metadata: CommandMetadata,
    ) -> Result<PerformanceReview, ReviewError> {
        if !metadata.capabilities().approve_reviews {
            return Err(ReviewError::forbidden());
        }

        let mut review = self
            .reviews
            .find_by_id(&cmd.review_id)
            .await?
            .ok_or_else(|| ReviewError::not_found(cmd.review_id))?;

        let now = Timestamp::now();
        review.approve(now)?;
        self.reviews.update(&review).await?;

        let event = ReviewApproved {
            event_id: EventId::new(),
            review_id: review.id(),
            employee_id: review.employee_id().clone(),
            approved_by: metadata.user_id().clone(),
            approved_at: now,
        };
        publish_event(self.event_publisher.as_ref(), &event, &metadata).await;

        tracing::info!(review_id = %review.id(), "review approved");
        Ok(review)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::*;
    use crate::domain::foundation::Period;
    use crate::domain::review::ReviewStatus;

    fn handler(env: &TestEnv) -> ApproveReviewHandler {
        ApproveReviewHandler::new(env.store.clone(), env.bus.clone())
    }

    #[tokio::test]
    async fn approval_completes_review() {
        let env = TestEnv::new().await;
        let review = env.submitted_review(ANA, Period::current(), &[9, 9, 9]).await;

        let approved = handler(&env)
            .handle(ApproveReviewCommand { review_id: review.id() }, admin())
            .await
            .unwrap();

        assert_eq!(approved.status(), ReviewStatus::Completed);
        assert!(approved.completed_at().is_some());
        assert!(env.bus.has_event("review.approved.v1"));
    }

    #[tokio::test]
    async fn pending_review_cannot_be_approved_directly() {
        let env = TestEnv::new().await;
        let review = env.open_review(ANA, Period::current()).await;

        let err = handler(&env)
            .handle(ApproveReviewCommand { review_id: review.id() }, admin())
            .await
            .unwrap_err();
        assert!(matches!(err, ReviewError::InvalidState(_)));
        assert_eq!(env.bus.event_count(), 0);
    }

    #[tokio::test]
    async fn completed_review_rejects_second_approval() {
        let env = TestEnv::new().await;
        let review = env.submitted_review(ANA, Period::current(), &[9, 9, 9]).await;
        let h = handler(&env);
        h.handle(ApproveReviewCommand { review_id: review.id() }, admin())
            .await
            .unwrap();

        let err = h
            .handle(ApproveReviewCommand { review_id: review.id() }, admin())
            .await
            .unwrap_err();
        assert_eq!(err, ReviewError::AlreadyCompleted);
    }

    #[tokio::test]
    async fn managers_cannot_approve() {
        let env = TestEnv::new().await;
        let review = env.submitted_review(ANA, Period::current(), &[9, 9, 9]).await;

        let err = handler(&env)
            .handle(ApproveReviewCommand { review_id: review.id() }, manager())
            .await
            .unwrap_err();
        assert_eq!(err, ReviewError::Forbidden);
    }
}
