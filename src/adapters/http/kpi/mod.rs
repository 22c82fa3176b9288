//! HTTP adapter for KPI models and assessments.

mod dto;
mod handlers;
mod routes;

pub use dto::ProcessKpiResponse;
pub use handlers::KpiHandlers;
pub use routes::kpi_routes;
