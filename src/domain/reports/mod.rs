//! Report aggregators.
//!
//! Pure folds over reviews, the org chart and the bonus tables. Handlers load
//! the inputs through ports and pass them in together with the caller.

mod bonus_report;
mod dashboard;
mod errors;
mod history;
mod leaderboard;


use std::cmp::Ordering;

pub use bonus_report::{build_bonus_report, BonusReportRow};
pub use dashboard::{
    people_in_scope, review_summary, team_highlight, EmployeeOfTheMonth, ReviewSummaryRow,
    TeamHighlight,
};
pub use errors::ReportError;
pub use history::{performance_history, PerformanceHistoryPoint};
pub use leaderboard::{build_leaderboard, LeaderboardRow};

/// Case-insensitive name order with a byte-wise tie-break.
pub(crate) fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}
