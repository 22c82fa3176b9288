//! KPI domain events.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    domain_event, DepartmentId, EventId, KpiAssessmentId, Period, Timestamp, UserId,
};

/// Published after an apuração was committed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KpiResultsProcessed {
    pub event_id: EventId,
    pub assessment_id: KpiAssessmentId,
    pub department_id: DepartmentId,
    pub period: Period,
    pub kpi_score: f64,
    pub reviews_affected: usize,
    pub reviews_completed: usize,
    pub processed_by: UserId,
    pub processed_at: Timestamp,
}

domain_event!(
    KpiResultsProcessed,
    event_type = "kpi.results_processed.v1",
    aggregate_id = assessment_id,
    aggregate_type = "KpiAssessment",
    occurred_at = processed_at,
    event_id = event_id
);

/// Published after an assessment was deleted and its score retracted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KpiAssessmentDeleted {
    pub event_id: EventId,
    pub assessment_id: KpiAssessmentId,
    pub department_id: DepartmentId,
    pub period: Period,
    pub reviews_cleared: usize,
    pub deleted_by: UserId,
    pub deleted_at: Timestamp,
}

domain_event!(
    KpiAssessmentDeleted,
    event_type = "kpi.assessment_deleted.v1",
    aggregate_id = assessment_id,
    aggregate_type = "KpiAssessment",
    occurred_at = deleted_at,
    event_id = event_id
);
