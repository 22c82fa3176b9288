//! Per-department, per-period KPI assessment snapshot.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DepartmentId, KpiAssessmentId, Period, Timestamp};

use super::{kpi_score, KpiIndicator, KpiResults};

/// Record of one "apuração": the indicators, the results entered and the
/// resulting score, frozen at processing time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiAssessment {
    id: KpiAssessmentId,
    department_id: DepartmentId,
    department_name: String,
    period: Period,
    kpi_score: f64,
    results: KpiResults,
    indicators: Vec<KpiIndicator>,
    assessed_at: Timestamp,
}

impl KpiAssessment {
    /// Computes the score and captures a snapshot of the indicators.
    pub fn assess(
        department_id: DepartmentId,
        department_name: impl Into<String>,
        period: Period,
        indicators: Vec<KpiIndicator>,
        results: KpiResults,
    ) -> Self {
        let kpi_score = kpi_score(&indicators, &results);
        Self {
            id: KpiAssessmentId::new(),
            department_id,
            department_name: department_name.into(),
            period,
            kpi_score,
            results,
            indicators,
            assessed_at: Timestamp::now(),
        }
    }

    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: KpiAssessmentId,
        department_id: DepartmentId,
        department_name: String,
        period: Period,
        kpi_score: f64,
        results: KpiResults,
        indicators: Vec<KpiIndicator>,
        assessed_at: Timestamp,
    ) -> Self {
        Self {
            id,
            department_id,
            department_name,
            period,
            kpi_score,
            results,
            indicators,
            assessed_at,
        }
    }

    /// Keeps the identity of an earlier snapshot for the same department and period.
    pub fn superseding(mut self, previous: &KpiAssessment) -> Self {
        self.id = previous.id;
        self
    }

    pub fn id(&self) -> KpiAssessmentId {
        self.id
    }

    pub fn department_id(&self) -> DepartmentId {
        self.department_id
    }

    pub fn department_name(&self) -> &str {
        &self.department_name
    }

    pub fn period(&self) -> Period {
        self.period
    }

    pub fn kpi_score(&self) -> f64 {
        self.kpi_score
    }

    pub fn results(&self) -> &KpiResults {
        &self.results
    }

    pub fn indicators(&self) -> &[KpiIndicator] {
        &self.indicators
    }

    pub fn assessed_at(&self) -> Timestamp {
        self.assessed_at
    }
}
