//! ListKpiAssessmentsHandler - Assessment history.

use std::sync::Arc;

use crate::domain::foundation::{Actor, DepartmentId, Period};
use crate::domain::kpi::{KpiAssessment, KpiError};
use crate::ports::KpiAssessmentRepository;

#[derive(Debug, Clone)]
pub struct ListKpiAssessmentsQuery {
    pub actor: Actor,
    pub period: Option<Period>,
    pub department_id: Option<DepartmentId>,
}

pub struct ListKpiAssessmentsHandler {
    assessments: Arc<dyn KpiAssessmentRepository>,
}

impl ListKpiAssessmentsHandler {
    pub fn new(assessments: Arc<dyn KpiAssessmentRepository>) -> Self {
        Self { assessments }
    }

    /// Newest period first.
    pub async fn handle(&self, query: ListKpiAssessmentsQuery) -> Result<Vec<KpiAssessment>, KpiError> {
        if !query.actor.capabilities().process_kpi {
            return Err(KpiError::forbidden());
        }
        Ok(self
            .assessments
            .list(query.period, query.department_id)
            .await?)
    }
}
