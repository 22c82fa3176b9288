//! HTTP routes for template endpoints.

use axum::{
    routing::{delete, get, put},
    Router,
};

use super::handlers::{
    assign_template, delete_template, list_assigned_templates, list_templates, save_template,
    TemplateHandlers,
};

/// Creates the template router, mounted at `/api/templates`.
pub fn template_routes(handlers: TemplateHandlers) -> Router {
    Router::new()
        .route("/", get(list_templates).post(save_template))
        .route("/assigned", get(list_assigned_templates))
        .route("/:id", delete(delete_template))
        .route("/:id/assignments", put(assign_template))
        .with_state(handlers)
}
