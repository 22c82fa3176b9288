//! DeleteWeeklyObservationHandler - Removes a note from a review.

use std::sync::Arc;

use crate::domain::foundation::{CommandMetadata, ObservationId, ReviewId};
use crate::domain::review::ReviewError;
use crate::ports::{ObservationRepository, ReviewRepository};

#[derive(Debug, Clone)]
pub struct DeleteWeeklyObservationCommand {
    pub review_id: ReviewId,
    pub observation_id: ObservationId,
}

pub struct DeleteWeeklyObservationHandler {
    reviews: Arc<dyn ReviewRepository>,
    observations: Arc<dyn ObservationRepository>,
}

impl DeleteWeeklyObservationHandler {
    pub fn new(
        reviews: Arc<dyn ReviewRepository>,
        observations: Arc<dyn ObservationRepository>,
    ) -> Self {
        Self {
            reviews,
            observations,
        }
    }

    pub async fn handle(
        &self,
        cmd: DeleteWeeklyObservationCommand,
        metadata: CommandMetadata,
    ) -> Result<(), ReviewError> {
        let observation = self
            .observations
            .find_weekly(&cmd.observation_id)
            .await?
            .filter(|o| o.review_id == cmd.review_id)
            .ok_or(ReviewError::ObservationNotFound(cmd.observation_id))?;

        let review = self
            .reviews
            .find_by_id(&observation.review_id)
            .await?
            .ok_or_else(|| ReviewError::not_found(observation.review_id))?;
        review.authorize_manage(&metadata.actor)?;

        self.observations.delete_weekly(&observation.id).await?;
        Ok(())
    }
}
