//! SubmitReviewHandler - Manager submits scores and feedback for approval.

use std::sync::Arc;

use crate::domain::foundation::{CommandMetadata, EventId, ReviewId};
use crate::domain::review::{
    ItemScores, PerformanceReview, ReviewError, ReviewSubmission, ReviewSubmitted,
};
use crate::ports::{EventPublisher, ReviewRepository, TemplateRepository};

use super::super::publish_event;

/// Command to submit a review.
#[derive(Debug, Clone)]
pub struct SubmitReviewCommand {
    pub review_id: ReviewId,
    pub scores: ItemScores,
    pub feedback_for_employee: String,
    pub manager_observations: Option<String>,
}

/// Result of a successful submission.
#[derive(Debug, Clone)]
pub struct SubmitReviewResult {
    pub review: PerformanceReview,
    pub average_score: f64,
}

/// Handler for review submission.
pub struct SubmitReviewHandler {
    reviews: Arc<dyn ReviewRepository>,
    templates: Arc<dyn TemplateRepository>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl SubmitReviewHandler {
    pub fn new(
        reviews: Arc<dyn ReviewRepository>,
        templates: Arc<dyn TemplateRepository>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            reviews,
            templates,
            event_publisher,
        }
    }

    pub async fn handle(
        &self,
        cmd: SubmitReviewCommand,
        metadata: CommandMetadata,
    ) -> Result<SubmitReviewResult, ReviewError> {
        // 1. Load review
        let mut review = self
            .reviews
            .find_by_id(&cmd.review_id)
            .await?
            .ok_or_else(|| ReviewError::not_found(cmd.review_id))?;

        // 2. Authorize - responsible manager or administrator
        review.authorize_manage(&metadata.actor)?;

        // 3. Every template item must be scored
        let template = self
            .templates
            .find_by_id(&review.template_id())
            .await?
            .ok_or(ReviewError::TemplateNotFound(review.template_id()))?;

        // 4. Submit
        let average_score = review.submit(
            ReviewSubmission {
                scores: cmd.scores,
                feedback_for_employee: cmd.feedback_for_employee,
                manager_observations: cmd.manager_observations,
            },
            template.item_count(),
        )?;

        // 5. Persist
        self.reviews.update(&review).await?;

        // 6. Publish event
        let event = ReviewSubmitted {
            event_id: EventId::new(),
            review_id: review.id(),
            employee_id: review.employee_id().clone(),
            average_score,
            submitted_by: metadata.user_id().clone(),
            submitted_at: review.updated_at(),
        };
        publish_event(self.event_publisher.as_ref(), &event, &metadata).await;

        tracing::info!(review_id = %review.id(), average_score, "review submitted");
        Ok(SubmitReviewResult {
            review,
            average_score,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::*;
    use crate::domain::foundation::Period;
    use crate::domain::review::ReviewStatus;

    fn handler(env: &TestEnv) -> SubmitReviewHandler {
        SubmitReviewHandler::new(env.store.clone(), env.store.clone(), env.bus.clone())
    }

    fn command(review_id: ReviewId, values: &[u8], feedback: &str) -> SubmitReviewCommand {
        SubmitReviewCommand {
            review_id,
            scores: scores(values),
            feedback_for_employee: feedback.to_string(),
            manager_observations: Some("Observar evolução em comunicação".to_string()),
        }
    }

    const FEEDBACK: &str = "Entregou todas as metas com qualidade e no prazo.";

    #[tokio::test]
    async fn submission_freezes_average_and_awaits_approval() {
        let env = TestEnv::new().await;
        let review = env.open_review(ANA, Period::current()).await;

        let result = handler(&env)
            .handle(command(review.id(), &[8, 6, 10], FEEDBACK), manager())
            .await
            .unwrap();

        assert_eq!(result.average_score, 8.0);
        let stored = env.store.find_for_employee(&uid(ANA), Period::current()).await.unwrap().unwrap();
        assert_eq!(stored.status(), ReviewStatus::AwaitingApproval);
        assert_eq!(stored.average_score(), Some(8.0));

        let events = env.bus.events_of_type("review.submitted.v1");
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].aggregate_id, review.id().to_string());
        assert_eq!(
            events[0].metadata.correlation_id.as_deref(),
            Some("test-correlation-id")
        );
    }

    #[tokio::test]
    async fn rejects_missing_item_scores() {
        let env = TestEnv::new().await;
        let review = env.open_review(ANA, Period::current()).await;

        let err = handler(&env)
            .handle(command(review.id(), &[8, 6], FEEDBACK), manager())
            .await
            .unwrap_err();
        assert!(matches!(err, ReviewError::ValidationFailed { .. }));
        assert_eq!(env.bus.event_count(), 0);
    }

    #[tokio::test]
    async fn rejects_short_feedback() {
        let env = TestEnv::new().await;
        let review = env.open_review(ANA, Period::current()).await;

        let err = handler(&env)
            .handle(command(review.id(), &[8, 6, 10], "Bom trabalho"), manager())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ReviewError::ValidationFailed { ref field, .. } if field == "feedback_for_employee"
        ));
    }

    #[tokio::test]
    async fn only_the_responsible_manager_submits() {
        let env = TestEnv::new().await;
        let review = env.open_review(ANA, Period::current()).await;

        let err = handler(&env)
            .handle(command(review.id(), &[8, 6, 10], FEEDBACK), other_manager())
            .await
            .unwrap_err();
        assert_eq!(err, ReviewError::Forbidden);

        let err = handler(&env)
            .handle(command(review.id(), &[8, 6, 10], FEEDBACK), collaborator(ANA))
            .await
            .unwrap_err();
        assert_eq!(err, ReviewError::Forbidden);
    }

    #[tokio::test]
    async fn submitting_twice_without_adjustment_is_invalid() {
        let env = TestEnv::new().await;
        let review = env.submitted_review(ANA, Period::current(), &[5, 5, 5]).await;

        let err = handler(&env)
            .handle(command(review.id(), &[8, 6, 10], FEEDBACK), manager())
            .await
            .unwrap_err();
        assert!(matches!(err, ReviewError::InvalidState(_)));
    }

    #[tokio::test]
    async fn unknown_review_is_not_found() {
        let env = TestEnv::new().await;
        let err = handler(&env)
            .handle(command(ReviewId::new(), &[8, 6, 10], FEEDBACK), manager())
            .await
            .unwrap_err();
        assert!(matches!(err, ReviewError::NotFound(_)));
    }
}
