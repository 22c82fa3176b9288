//! Individual performance trend.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Period, UserId};
use crate::domain::review::PerformanceReview;

/// One point of an employee's trend line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceHistoryPoint {
    pub period: Period,
    pub average_score: f64,
}

/// Completed reviews of `employee_id`, newest period first.
pub fn performance_history(
    employee_id: &UserId,
    reviews: &[PerformanceReview],
) -> Vec<PerformanceHistoryPoint> {
    let mut points: Vec<PerformanceHistoryPoint> = reviews
        .iter()
        .filter(|r| r.employee_id() == employee_id && r.is_completed())
        .map(|r| PerformanceHistoryPoint {
            period: r.period(),
            average_score: r.average_score().unwrap_or(0.0),
        })
        .collect();
    points.sort_by(|a, b| b.period.cmp(&a.period));
    points
}
