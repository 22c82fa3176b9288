//! Per-employee bonus report for a period.

use serde::{Deserialize, Serialize};

use crate::domain::bonus::BonusParameters;
use crate::domain::foundation::{BonusAudience, Period, ReviewId, Role, UserId};
use crate::domain::org::OrgChart;
use crate::domain::review::PerformanceReview;

/// One completed review with its resolved bonus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BonusReportRow {
    pub review_id: ReviewId,
    pub employee_id: UserId,
    pub employee_name: String,
    pub department_name: Option<String>,
    pub role: Role,
    pub average_score: f64,
    pub kpi_score: f64,
    pub performance_bonus_percentage: f64,
    pub base_kpi_bonus: f64,
    pub final_kpi_bonus: f64,
}

/// Resolves the bonus of every completed review in `period`, sorted by employee name.
///
/// The KPI column follows the employee's current role in the org chart. An
/// employee no longer in the directory gets no KPI bonus.
pub fn build_bonus_report(
    chart: &OrgChart,
    reviews: &[PerformanceReview],
    period: Period,
    params: &BonusParameters,
) -> Vec<BonusReportRow> {
    let mut rows: Vec<BonusReportRow> = reviews
        .iter()
        .filter(|r| r.period() == period && r.is_completed())
        .map(|review| {
            let average_score = review.average_score().unwrap_or(0.0);
            let kpi_score = review.kpi_score().unwrap_or(0.0);
            let performance_bonus_percentage = params.performance_percentage(average_score);
            let base_kpi_bonus = chart
                .employee(review.employee_id())
                .map(|employee| {
                    params.kpi_bonus_value(kpi_score, BonusAudience::for_role(employee.role))
                })
                .unwrap_or(0.0);

            BonusReportRow {
                review_id: review.id(),
                employee_id: review.employee_id().clone(),
                employee_name: review.employee_name().to_string(),
                department_name: review.subject().department_name.clone(),
                role: review.subject().employee_role,
                average_score,
                kpi_score,
                performance_bonus_percentage,
                base_kpi_bonus,
                final_kpi_bonus: base_kpi_bonus * (performance_bonus_percentage / 100.0),
            }
        })
        .collect();

    rows.sort_by(|a, b| super::compare_names(&a.employee_name, &b.employee_name));
    rows
}
