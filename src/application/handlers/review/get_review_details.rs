//! GetReviewDetailsHandler - Query handler for a single review page.

use std::sync::Arc;

use serde::Serialize;

use crate::domain::foundation::{Actor, Period, ReviewId};
use crate::domain::review::{
    ItemScores, PerformanceReview, ReviewError, ReviewStatus, ReviewTemplate, WeeklyObservation,
};
use crate::ports::{ObservationRepository, ReviewFilter, ReviewRepository, TemplateRepository};

/// Query for review details.
#[derive(Debug, Clone)]
pub struct GetReviewDetailsQuery {
    pub review_id: ReviewId,
    pub actor: Actor,
}

/// The employee's latest completed review before the one shown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PreviousReview {
    pub review_id: ReviewId,
    pub period: Period,
    pub average_score: Option<f64>,
    pub scores: ItemScores,
}

/// Everything the review page shows.
#[derive(Debug, Clone)]
pub struct ReviewDetails {
    pub review: PerformanceReview,
    /// `None` when the template has since been deleted.
    pub template: Option<ReviewTemplate>,
    /// Newest first.
    pub observations: Vec<WeeklyObservation>,
    pub previous: Option<PreviousReview>,
}

pub struct GetReviewDetailsHandler {
    reviews: Arc<dyn ReviewRepository>,
    templates: Arc<dyn TemplateRepository>,
    observations: Arc<dyn ObservationRepository>,
}

impl GetReviewDetailsHandler {
    pub fn new(
        reviews: Arc<dyn ReviewRepository>,
        templates: Arc<dyn TemplateRepository>,
        observations: Arc<dyn ObservationRepository>,
    ) -> Self {
        Self {
            reviews,
            templates,
            observations,
        }
    }

    pub async fn handle(&self, query: GetReviewDetailsQuery) -> Result<ReviewDetails, ReviewError> {
        let review = self
            .reviews
            .find_by_id(&query.review_id)
            .await?
            .ok_or_else(|| ReviewError::not_found(query.review_id))?;
        review.authorize_view(&query.actor)?;

        let template = self.templates.find_by_id(&review.template_id()).await?;
        let observations = self.observations.list_weekly(&review.id()).await?;

        let history = self
            .reviews
            .find(
                &ReviewFilter::default()
                    .with_employees(vec![review.employee_id().clone()])
                    .with_status(ReviewStatus::Completed),
            )
            .await?;
        let previous = history
            .into_iter()
            .filter(|r| r.period() < review.period())
            .max_by_key(|r| r.period())
            .map(|r| PreviousReview {
                review_id: r.id(),
                period: r.period(),
                average_score: r.average_score(),
                scores: r.scores().clone(),
            });

        Ok(ReviewDetails {
            review,
            template,
            observations,
            previous,
        })
    }
}
