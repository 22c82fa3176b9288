//! HTTP routes for KPI endpoints.

use axum::{
    routing::{delete, get},
    Router,
};

use super::handlers::{
    delete_assessment, list_assessments, list_models, process_results, save_model, KpiHandlers,
};

/// Creates the KPI router, mounted at `/api/kpi`.
pub fn kpi_routes(handlers: KpiHandlers) -> Router {
    Router::new()
        .route("/models", get(list_models).put(save_model))
        .route("/assessments", get(list_assessments).post(process_results))
        .route("/assessments/:id", delete(delete_assessment))
        .with_state(handlers)
}
