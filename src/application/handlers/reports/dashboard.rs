//! Dashboard handlers: review status board and employee of the month.

use std::sync::Arc;

use crate::domain::foundation::{Actor, Period};
use crate::domain::reports::{
    review_summary, team_highlight, ReportError, ReviewSummaryRow, TeamHighlight,
};
use crate::ports::{OrgDirectory, ReviewFilter, ReviewRepository};

#[derive(Debug, Clone)]
pub struct ReviewSummaryQuery {
    pub actor: Actor,
    pub period: Period,
}

#[derive(Debug, Clone)]
pub struct TeamHighlightQuery {
    pub actor: Actor,
    pub period: Period,
}

pub struct DashboardHandler {
    reviews: Arc<dyn ReviewRepository>,
    directory: Arc<dyn OrgDirectory>,
}

impl DashboardHandler {
    pub fn new(reviews: Arc<dyn ReviewRepository>, directory: Arc<dyn OrgDirectory>) -> Self {
        Self { reviews, directory }
    }

    /// One row per person in the caller's scope, sorted by name.
    pub async fn review_summary(
        &self,
        query: ReviewSummaryQuery,
    ) -> Result<Vec<ReviewSummaryRow>, ReportError> {
        if !query.actor.capabilities().manage_team_reviews {
            return Ok(Vec::new());
        }
        let chart = self.directory.org_chart().await?;
        let reviews = self
            .reviews
            .find(&ReviewFilter::for_period(query.period))
            .await?;
        Ok(review_summary(&query.actor, &chart, &reviews, query.period))
    }

    /// The caller's best team member in the period, if anyone completed a review.
    pub async fn team_highlight(
        &self,
        query: TeamHighlightQuery,
    ) -> Result<Option<TeamHighlight>, ReportError> {
        if !query.actor.capabilities().manage_team_reviews {
            return Err(ReportError::forbidden());
        }
        let chart = self.directory.org_chart().await?;
        let reviews = self
            .reviews
            .find(&ReviewFilter::for_period(query.period))
            .await?;
        Ok(team_highlight(
            &query.actor.user_id,
            &chart,
            &reviews,
            query.period,
        ))
    }
}
