//! RequestAdjustmentHandler - Administrator sends a submitted review back.

use std::sync::Arc;

use crate::domain::foundation::{CommandMetadata, EventId, ReviewId};
use crate::domain::review::{PerformanceReview, ReviewAdjustmentRequested, ReviewError};
use crate::ports::{EventPublisher, ReviewRepository};

use super::super::publish_event;

/// Command to request changes to a submitted review.
#[derive(Debug, Clone)]
pub struct RequestAdjustmentCommand {
    pub review_id: ReviewId,
    pub feedback_for_manager: String,
}

/// Handler for adjustment requests.
pub struct RequestAdjustmentHandler {
    reviews: Arc<dyn ReviewRepository>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl RequestAdjustmentHandler {
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
        cmd: RequestAdjustmentCommand,
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

        review.request_adjustment(&cmd.feedback_for_manager)?;
        self.reviews.update(&review).await?;

        let event = ReviewAdjustmentRequested {
            event_id: EventId::new(),
            review_id: review.id(),
            manager_id: review.manager_id().clone(),
            requested_by: metadata.user_id().clone(),
            requested_at: review.updated_at(),
        };
        publish_event(self.event_publisher.as_ref(), &event, &metadata).await;

        Ok(review)
    }
}
