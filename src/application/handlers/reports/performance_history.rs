//! PerformanceHistoryHandler - An employee's trend of completed averages.

use std::sync::Arc;

use crate::domain::foundation::{Actor, UserId};
use crate::domain::reports::{performance_history, PerformanceHistoryPoint, ReportError};
use crate::domain::review::ReviewStatus;
use crate::ports::{OrgDirectory, ReviewFilter, ReviewRepository};

#[derive(Debug, Clone)]
pub struct PerformanceHistoryQuery {
    pub actor: Actor,
    pub employee_id: UserId,
}

pub struct PerformanceHistoryHandler {
    reviews: Arc<dyn ReviewRepository>,
    directory: Arc<dyn OrgDirectory>,
}

impl PerformanceHistoryHandler {
    pub fn new(reviews: Arc<dyn ReviewRepository>, directory: Arc<dyn OrgDirectory>) -> Self {
        Self { reviews, directory }
    }

    /// Visible to the employee, their manager and administrators.
    pub async fn handle(
        &self,
        query: PerformanceHistoryQuery,
    ) -> Result<Vec<PerformanceHistoryPoint>, ReportError> {
        let chart = self.directory.org_chart().await?;
        if chart.employee(&query.employee_id).is_none() {
            return Err(ReportError::EmployeeNotFound(query.employee_id));
        }

        let actor = &query.actor;
        let allowed = actor.is_self_or_admin(&query.employee_id)
            || (actor.capabilities().manage_team_reviews
                && chart
                    .team_of(&actor.user_id)
                    .iter()
                    .any(|m| m.id == query.employee_id));
        if !allowed {
            return Err(ReportError::forbidden());
        }

        let reviews = self
            .reviews
            .find(
                &ReviewFilter::default()
                    .with_employees(vec![query.employee_id.clone()])
                    .with_status(ReviewStatus::Completed),
            )
            .await?;
        Ok(performance_history(&query.employee_id, &reviews))
    }
}
