//! HTTP handlers for template endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::{handle_review_error, parse_param};
use crate::adapters::http::extract::ApiJson;
use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::reviews::metadata_for;
use crate::adapters::http::ApiPorts;
use crate::application::handlers::template::{
    AssignTemplateCommand, AssignTemplateHandler, DeleteTemplateCommand, DeleteTemplateHandler,
    ListAssignedTemplatesQuery, ListTemplatesHandler, ListTemplatesQuery, SaveTemplateCommand,
    SaveTemplateHandler,
};
use crate::domain::foundation::TemplateId;
use crate::domain::review::ReviewTemplate;

use super::dto::{AssignTemplateRequest, AssignmentResponse, SaveTemplateRequest, TemplateResponse};

#[derive(Clone)]
pub struct TemplateHandlers {
    save: Arc<SaveTemplateHandler>,
    delete: Arc<DeleteTemplateHandler>,
    assign: Arc<AssignTemplateHandler>,
    list: Arc<ListTemplatesHandler>,
}

impl TemplateHandlers {
    pub fn new(ports: &ApiPorts) -> Self {
        Self {
            save: Arc::new(SaveTemplateHandler::new(ports.templates.clone())),
            delete: Arc::new(DeleteTemplateHandler::new(ports.templates.clone())),
            assign: Arc::new(AssignTemplateHandler::new(
                ports.templates.clone(),
                ports.directory.clone(),
            )),
            list: Arc::new(ListTemplatesHandler::new(ports.templates.clone())),
        }
    }
}

fn to_body(templates: &[ReviewTemplate]) -> Vec<TemplateResponse> {
    templates.iter().map(TemplateResponse::from).collect()
}

/// GET /api/templates - All templates (administrators)
pub async fn list_templates(
    State(handlers): State<TemplateHandlers>,
    RequireAuth(user): RequireAuth,
) -> Response {
    match handlers.list.handle(ListTemplatesQuery { actor: user.actor() }).await {
        Ok(templates) => (StatusCode::OK, Json(to_body(&templates))).into_response(),
        Err(e) => handle_review_error(e),
    }
}

/// GET /api/templates/assigned - Templates the caller may use
pub async fn list_assigned_templates(
    State(handlers): State<TemplateHandlers>,
    RequireAuth(user): RequireAuth,
) -> Response {
    let query = ListAssignedTemplatesQuery { actor: user.actor() };
    match handlers.list.handle_assigned(query).await {
        Ok(templates) => (StatusCode::OK, Json(to_body(&templates))).into_response(),
        Err(e) => handle_review_error(e),
    }
}

/// POST /api/templates - Create or update a template
pub async fn save_template(
    State(handlers): State<TemplateHandlers>,
    RequireAuth(user): RequireAuth,
    ApiJson(req): ApiJson<SaveTemplateRequest>,
) -> Response {
    let created = req.id.is_none();
    let cmd = SaveTemplateCommand {
        template_id: req.id,
        name: req.name,
        items: req.items,
    };

    match handlers.save.handle(cmd, metadata_for(&user)).await {
        Ok(template) => {
            let status = if created { StatusCode::CREATED } else { StatusCode::OK };
            (status, Json(TemplateResponse::from(&template))).into_response()
        }
        Err(e) => handle_review_error(e),
    }
}

/// DELETE /api/templates/:id
pub async fn delete_template(
    State(handlers): State<TemplateHandlers>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
) -> Response {
    let template_id: TemplateId = match parse_param("template ID", &id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match handlers
        .delete
        .handle(DeleteTemplateCommand { template_id }, metadata_for(&user))
        .await
    {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => handle_review_error(e),
    }
}

/// PUT /api/templates/:id/assignments - Replace the managers allowed to use it
pub async fn assign_template(
    State(handlers): State<TemplateHandlers>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<AssignTemplateRequest>,
) -> Response {
    let template_id: TemplateId = match parse_param("template ID", &id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let cmd = AssignTemplateCommand {
        template_id,
        manager_ids: req.manager_ids,
    };

    match handlers.assign.handle(cmd, metadata_for(&user)).await {
        Ok(assignment) => {
            (StatusCode::OK, Json(AssignmentResponse::from(assignment))).into_response()
        }
        Err(e) => handle_review_error(e),
    }
}
