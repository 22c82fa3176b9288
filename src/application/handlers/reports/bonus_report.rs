//! BonusReportHandler - Bonus resolution for every completed review.

use std::sync::Arc;

use crate::domain::foundation::{Actor, DepartmentId, Period};
use crate::domain::reports::{build_bonus_report, BonusReportRow, ReportError};
use crate::ports::{BonusParametersStore, OrgDirectory, ReviewFilter, ReviewRepository};

use super::super::bonus::load_bonus_parameters;

#[derive(Debug, Clone)]
pub struct BonusReportQuery {
    pub actor: Actor,
    pub period: Period,
    pub department_id: Option<DepartmentId>,
}

pub struct BonusReportHandler {
    reviews: Arc<dyn ReviewRepository>,
    directory: Arc<dyn OrgDirectory>,
    bonus: Arc<dyn BonusParametersStore>,
}

impl BonusReportHandler {
    pub fn new(
        reviews: Arc<dyn ReviewRepository>,
        directory: Arc<dyn OrgDirectory>,
        bonus: Arc<dyn BonusParametersStore>,
    ) -> Self {
        Self {
            reviews,
            directory,
            bonus,
        }
    }

    /// An unknown department yields an empty report.
    pub async fn handle(&self, query: BonusReportQuery) -> Result<Vec<BonusReportRow>, ReportError> {
        if !query.actor.capabilities().view_all_reviews {
            return Err(ReportError::forbidden());
        }
        let chart = self.directory.org_chart().await?;

        let mut filter = ReviewFilter::for_period(query.period);
        if let Some(department_id) = query.department_id {
            if chart.department(&department_id).is_none() {
                return Ok(Vec::new());
            }
            filter = filter.with_department(department_id);
        }

        let reviews = self.reviews.find(&filter).await?;
        let params = load_bonus_parameters(self.bonus.as_ref()).await?;
        Ok(build_bonus_report(&chart, &reviews, query.period, &params))
    }
}
