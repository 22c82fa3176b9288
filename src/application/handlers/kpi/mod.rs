//! KPI model and assessment handlers.

mod delete_kpi_assessment;
mod kpi_models;
mod list_kpi_assessments;
mod process_kpi_results;

pub use delete_kpi_assessment::{DeleteKpiAssessmentCommand, DeleteKpiAssessmentHandler};
pub use kpi_models::{ListKpiModelsHandler, ListKpiModelsQuery, SaveKpiModelCommand, SaveKpiModelHandler};
pub use list_kpi_assessments::{ListKpiAssessmentsHandler, ListKpiAssessmentsQuery};
pub use process_kpi_results::{
    ProcessKpiResultsCommand, ProcessKpiResultsHandler, ProcessKpiResultsResult,
};
