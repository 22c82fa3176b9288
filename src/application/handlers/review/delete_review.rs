//! DeleteReviewHandler - Hard-deletes a review and its observations.

use std::sync::Arc;

use crate::domain::foundation::{CommandMetadata, EventId, ReviewId, Timestamp};
use crate::domain::review::{ReviewDeleted, ReviewError};
use crate::ports::{EventPublisher, ReviewRepository};

use super::super::publish_event;

/// Command to delete a review.
#[derive(Debug, Clone)]
pub struct DeleteReviewCommand {
    pub review_id: ReviewId,
}

/// Handler for review deletion. Allowed in every status.
pub struct DeleteReviewHandler {
    reviews: Arc<dyn ReviewRepository>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl DeleteReviewHandler {
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
        cmd: DeleteReviewCommand,
        metadata: CommandMetadata,
    ) -> Result<(), ReviewError> {
        let review = self
            .reviews
            .find_by_id(&cmd.review_id)
            .await?
            .ok_or_else(|| ReviewError::not_found(cmd.review_id))?;
        review.authorize_manage(&metadata.actor)?;

        self.reviews.delete(&cmd.review_id).await?;

        let event = ReviewDeleted {
            event_id: EventId::new(),
            review_id: cmd.review_id,
            deleted_by: metadata.user_id().clone(),
            deleted_at: Timestamp::now(),
        };
        publish_event(self.event_publisher.as_ref(), &event, &metadata).await;

        tracing::info!(review_id = %cmd.review_id, "review deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::*;
    use crate::domain::foundation::Period;
    use crate::domain::review::WeeklyObservation;
    use crate::ports::ObservationRepository;

    fn handler(env: &TestEnv) -> DeleteReviewHandler {
        DeleteReviewHandler::new(env.store.clone(), env.bus.clone())
    }

    #[tokio::test]
    async fn deletes_review_with_observations() {
        let env = TestEnv::new().await;
        let review = env.submitted_review(ANA, Period::current(), &[6, 6, 6]).await;
        env.store
            .add_weekly(&WeeklyObservation::new(review.id(), "Boa semana", uid(MANAGER)).unwrap())
            .await
            .unwrap();

        handler(&env)
            .handle(DeleteReviewCommand { review_id: review.id() }, manager())
            .await
            .unwrap();

        assert!(env.store.find_by_id(&review.id()).await.unwrap().is_none());
        assert!(env.store.list_weekly(&review.id()).await.unwrap().is_empty());
        assert!(env.bus.has_event("review.deleted.v1"));
    }

    #[tokio::test]
    async fn other_managers_cannot_delete() {
        let env = TestEnv::new().await;
        let review = env.open_review(ANA, Period::current()).await;

        let err = handler(&env)
            .handle(DeleteReviewCommand { review_id: review.id() }, other_manager())
            .await
            .unwrap_err();
        assert_eq!(err, ReviewError::Forbidden);
    }

    #[tokio::test]
    async fn unknown_review_is_not_found() {
        let env = TestEnv::new().await;
        let err = handler(&env)
            .handle(DeleteReviewCommand { review_id: ReviewId::new() }, admin())
            .await
            .unwrap_err();
        assert!(matches!(err, ReviewError::NotFound(_)));
    }
}
