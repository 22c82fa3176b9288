//! AddWeeklyObservationHandler - Attaches a note to a review.

use std::sync::Arc;

use crate::domain::foundation::{CommandMetadata, ReviewId};
use crate::domain::review::{ReviewError, WeeklyObservation};
use crate::ports::{ObservationRepository, ReviewRepository};

#[derive(Debug, Clone)]
pub struct AddWeeklyObservationCommand {
    pub review_id: ReviewId,
    pub text: String,
}

pub struct AddWeeklyObservationHandler {
    reviews: Arc<dyn ReviewRepository>,
    observations: Arc<dyn ObservationRepository>,
}

impl AddWeeklyObservationHandler {
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
        cmd: AddWeeklyObservationCommand,
        metadata: CommandMetadata,
    ) -> Result<WeeklyObservation, ReviewError> {
        let review = self
            .reviews
            .find_by_id(&cmd.review_id)
            .await?
            .ok_or_else(|| ReviewError::not_found(cmd.review_id))?;
        review.authorize_manage(&metadata.actor)?;

        let observation =
            WeeklyObservation::new(review.id(), &cmd.text, metadata.user_id().clone())?;
        self.observations.add_weekly(&observation).await?;
        Ok(observation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::*;
    use crate::domain::foundation::Period;

    fn handler(env: &TestEnv) -> AddWeeklyObservationHandler {
        AddWeeklyObservationHandler::new(env.store.clone(), env.store.clone())
    }

    #[tokio::test]
    async fn responsible_manager_adds_note() {
        let env = TestEnv::new().await;
        let review = env.open_review(ANA, Period::current()).await;

        let observation = handler(&env)
            .handle(
                AddWeeklyObservationCommand {
                    review_id: review.id(),
                    text: "  Ajudou a equipe no fechamento  ".to_string(),
                },
                manager(),
            )
            .await
            .unwrap();

        assert_eq!(observation.text, "Ajudou a equipe no fechamento");
        assert_eq!(observation.author_id, uid(MANAGER));
        assert_eq!(env.store.list_weekly(&review.id()).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn blank_text_and_strangers_are_rejected() {
        let env = TestEnv::new().await;
        let review = env.open_review(ANA, Period::current()).await;

        let blank = handler(&env)
            .handle(
                AddWeeklyObservationCommand {
                    review_id: review.id(),
                    text: "   ".to_string(),
                },
                manager(),
            )
            .await;
        assert!(matches!(blank, Err(ReviewError::ValidationFailed { .. })));

        let stranger = handler(&env)
            .handle(
                AddWeeklyObservationCommand {
                    review_id: review.id(),
                    text: "Nota".to_string(),
                },
                collaborator(ANA),
            )
            .await;
        assert_eq!(stranger.unwrap_err(), ReviewError::Forbidden);
    }
}
