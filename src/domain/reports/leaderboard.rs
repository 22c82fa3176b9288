//! Per-manager ranking for a period.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::domain::bonus::BonusParameters;
use crate::domain::foundation::{BonusAudience, Period, UserId};
use crate::domain::org::OrgChart;
use crate::domain::review::PerformanceReview;

/// One manager's line on the leaderboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardRow {
    pub manager_id: UserId,
    pub manager_name: String,
    /// Mean of the team's completed review averages.
    pub average_score: f64,
    /// First KPI score found among the team's completed reviews.
    pub kpi_score: f64,
    /// Leader-column value of the KPI tier, not scaled by any performance percentage.
    pub kpi_bonus: f64,
    pub total_reviews: usize,
    pub team_size: usize,
}

/// Ranks managers by their team's completed review average, best first.
///
/// Managers without a team or without completed reviews in `period` are left out.
pub fn build_leaderboard(
    chart: &OrgChart,
    reviews: &[PerformanceReview],
    period: Period,
    params: &BonusParameters,
) -> Vec<LeaderboardRow> {
    let mut rows: Vec<LeaderboardRow> = chart
        .managers()
        .filter_map(|manager| {
            let team = chart.team_of(&manager.id);
            if team.is_empty() {
                return None;
            }
            let completed: Vec<&PerformanceReview> = reviews
                .iter()
                .filter(|r| r.period() == period && r.is_completed())
                .filter(|r| team.iter().any(|member| &member.id == r.employee_id()))
                .collect();
            if completed.is_empty() {
                return None;
            }

            let total: f64 = completed
                .iter()
                .map(|r| r.average_score().unwrap_or(0.0))
                .sum();
            let average_score = total / completed.len() as f64;
            let kpi_score = completed
                .iter()
                .find_map(|r| r.kpi_score())
                .unwrap_or(0.0);

            Some(LeaderboardRow {
                manager_id: manager.id.clone(),
                manager_name: manager.name.clone(),
                average_score,
                kpi_score,
                kpi_bonus: params.kpi_bonus_value(kpi_score, BonusAudience::Leader),
                total_reviews: completed.len(),
                team_size: team.len(),
            })
        })
        .collect();

    rows.sort_by(|a, b| {
        b.average_score
            .partial_cmp(&a.average_score)
            .unwrap_or(Ordering::Equal)
    });
    rows
}
