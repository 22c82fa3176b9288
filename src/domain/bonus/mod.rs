//! Bonus domain: tier rules, validated tables and the resolver.
//!
//! A person's KPI bonus is the value of the KPI tier their department's score
//! falls in, scaled by the percentage of the performance tier their
//! competency average falls in.

mod events;
mod resolver;
mod rules;
mod table;

pub use events::{BonusParametersUpdated, BonusTableKind};
pub use resolver::{BonusParameters, BonusResolution, DEFAULT_KPI_RULES, DEFAULT_PERFORMANCE_RULES};
pub use rules::{KpiBonusRule, PerformanceBonusRule, ScoreBand};
pub use table::BonusTable;
