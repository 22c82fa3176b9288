//! ListReviewsHandler - Role-scoped review listing.

use std::sync::Arc;

use crate::domain::foundation::{Actor, DepartmentId, Period};
use crate::domain::review::{PerformanceReview, ReviewError};
use crate::ports::{ReviewFilter, ReviewRepository};

/// Query to list reviews visible to `actor`.
#[derive(Debug, Clone)]
pub struct ListReviewsQuery {
    pub actor: Actor,
    pub period: Option<Period>,
    pub department_id: Option<DepartmentId>,
}

impl ListReviewsQuery {
    /// Scope implied by the caller's capabilities:
    /// - administrators see everything
    /// - managers see the reviews they are responsible for
    /// - everyone else sees their own
    fn to_filter(&self) -> ReviewFilter {
        let capabilities = self.actor.capabilities();
        let mut filter = ReviewFilter::default();
        if !capabilities.view_all_reviews {
            filter = if capabilities.manage_team_reviews {
                filter.with_manager(self.actor.user_id.clone())
            } else {
                filter.with_employees(vec![self.actor.user_id.clone()])
            };
        }
        filter.period = self.period;
        filter.department_id = self.department_id;
        filter
    }
}

pub struct ListReviewsHandler {
    reviews: Arc<dyn ReviewRepository>,
}

impl ListReviewsHandler {
    pub fn new(reviews: Arc<dyn ReviewRepository>) -> Self {
        Self { reviews }
    }

    /// Reviews sorted by period (newest first), then employee name.
    pub async fn handle(&self, query: ListReviewsQuery) -> Result<Vec<PerformanceReview>, ReviewError> {
        let mut reviews = self.reviews.find(&query.to_filter()).await?;
        reviews.sort_by(|a, b| {
            b.period().cmp(&a.period()).then_with(|| {
                a.employee_name()
                    .to_lowercase()
                    .cmp(&b.employee_name().to_lowercase())
            })
        });
        Ok(reviews)
    }
}
