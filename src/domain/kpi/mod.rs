//! KPI domain: indicator evaluation, department models and assessment snapshots.

mod assessment;
mod errors;
mod events;
mod indicator;
mod model;

pub use assessment::KpiAssessment;
pub use errors::KpiError;
pub use events::{KpiAssessmentDeleted, KpiResultsProcessed};
pub use indicator::{GoalCondition, IndicatorType, KpiIndicator, INDICATOR_NAME_MIN_CHARS};
pub use model::{kpi_score, KpiModel, KpiResults};
