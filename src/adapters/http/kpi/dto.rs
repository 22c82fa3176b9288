//! Request and response bodies for KPI endpoints.

use serde::{Deserialize, Serialize};

use crate::application::handlers::kpi::ProcessKpiResultsResult;
use crate::domain::foundation::{DepartmentId, KpiAssessmentId};
use crate::domain::kpi::{KpiIndicator, KpiResults};

#[derive(Debug, Clone, Deserialize)]
pub struct SaveKpiModelRequest {
    pub department_id: DepartmentId,
    pub indicators: Vec<KpiIndicator>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProcessKpiRequest {
    pub department_id: DepartmentId,
    /// `YYYY-MM`.
    pub period: String,
    /// Measured value per indicator position.
    pub results: KpiResults,
    /// Overrides the department's stored model when present.
    #[serde(default)]
    pub indicators: Option<Vec<KpiIndicator>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListAssessmentsParams {
    pub period: Option<String>,
    pub department_id: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProcessKpiResponse {
    pub kpi_score: f64,
    pub success: bool,
    pub message: String,
    pub reviews_affected_count: usize,
    pub reviews_completed: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assessment_id: Option<KpiAssessmentId>,
}

impl From<ProcessKpiResultsResult> for ProcessKpiResponse {
    fn from(result: ProcessKpiResultsResult) -> Self {
        Self {
            kpi_score: result.kpi_score,
            success: result.success,
            message: result.message,
            reviews_affected_count: result.reviews_affected_count,
            reviews_completed: result.reviews_completed,
            assessment_id: result.assessment.map(|a| a.id()),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DeleteAssessmentResponse {
    pub reviews_cleared: usize,
}
