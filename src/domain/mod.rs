//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (ids, periods, roles, errors, events)
//! - `org` - Employees, departments and reporting lines
//! - `review` - Performance review lifecycle, templates and observations
//! - `kpi` - Department KPI models and assessment snapshots
//! - `bonus` - Bonus tier tables and resolution
//! - `reports` - Pure report folds (leaderboard, bonus report, history, dashboard)

pub mod bonus;
pub mod foundation;
pub mod kpi;
pub mod org;
pub mod reports;
pub mod review;
