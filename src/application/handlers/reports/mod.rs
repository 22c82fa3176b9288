//! Report query handlers.

mod bonus_report;
mod dashboard;
mod employee_of_the_month;
mod leaderboard;
mod performance_history;

pub use bonus_report::{BonusReportHandler, BonusReportQuery};
pub use dashboard::{DashboardHandler, ReviewSummaryQuery, TeamHighlightQuery};
pub use employee_of_the_month::{
    EmployeeOfTheMonthHandler, EmployeeOfTheMonthQuery, UpdateEmployeeOfTheMonthCommand,
};
pub use leaderboard::{LeaderboardHandler, LeaderboardQuery};
pub use performance_history::{PerformanceHistoryHandler, PerformanceHistoryQuery};
