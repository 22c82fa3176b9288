//! GenerateFeedbackHandler - Drafts employee feedback from the manager's scores.

use std::sync::Arc;

use crate::domain::foundation::{CommandMetadata, ReviewId};
use crate::domain::review::{ItemScores, ReviewError};
use crate::ports::{
    FeedbackItem, FeedbackRequest, ReviewFeedbackGenerator, ReviewRepository, TemplateRepository,
};

/// Command to draft feedback. Nothing is persisted.
#[derive(Debug, Clone)]
pub struct GenerateFeedbackCommand {
    pub review_id: ReviewId,
    /// Draft scores currently on the manager's form.
    pub scores: ItemScores,
    pub manager_observations: Option<String>,
}

pub struct GenerateFeedbackHandler {
    reviews: Arc<dyn ReviewRepository>,
    templates: Arc<dyn TemplateRepository>,
    generator: Arc<dyn ReviewFeedbackGenerator>,
}

impl GenerateFeedbackHandler {
    pub fn new(
        reviews: Arc<dyn ReviewRepository>,
        templates: Arc<dyn TemplateRepository>,
        generator: Arc<dyn ReviewFeedbackGenerator>,
    ) -> Self {
        Self {
            reviews,
            templates,
            generator,
        }
    }

    pub async fn handle(
        &self,
        cmd: GenerateFeedbackCommand,
        metadata: CommandMetadata,
    ) -> Result<String, ReviewError> {
        let review = self
            .reviews
            .find_by_id(&cmd.review_id)
            .await?
            .ok_or_else(|| ReviewError::not_found(cmd.review_id))?;
        review.authorize_manage(&metadata.actor)?;

        let template = self
            .templates
            .find_by_id(&review.template_id())
            .await?
            .ok_or(ReviewError::TemplateNotFound(review.template_id()))?;

        let items: Vec<FeedbackItem> = template
            .items()
            .iter()
            .enumerate()
            .filter_map(|(index, item)| {
                cmd.scores.get(index).map(|score| FeedbackItem {
                    text: item.text.clone(),
                    score: score.value(),
                })
            })
            .collect();
        if items.is_empty() {
            return Err(ReviewError::validation(
                "scores",
                "Score at least one item before generating feedback",
            ));
        }

        let request = FeedbackRequest {
            items,
            manager_observations: cmd
                .manager_observations
                .map(|o| o.trim().to_string())
                .filter(|o| !o.is_empty()),
        };
        let feedback = self.generator.generate(&request).await?;
        tracing::debug!(review_id = %review.id(), chars = feedback.len(), "feedback drafted");
        Ok(feedback)
    }
}
