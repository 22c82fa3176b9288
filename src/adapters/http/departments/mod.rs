//! HTTP adapter for department management.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::adapters::http::error::{handle_domain_error, parse_param};
use crate::adapters::http::extract::ApiJson;
use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::reviews::metadata_for;
use crate::adapters::http::ApiPorts;
use crate::application::handlers::org::{
    DeleteDepartmentCommand, DepartmentHandler, ListDepartmentsQuery, SaveDepartmentCommand,
};
use crate::domain::foundation::{DepartmentId, UserId};
use crate::domain::org::Department;

#[derive(Debug, Clone, Deserialize)]
pub struct SaveDepartmentRequest {
    pub name: String,
    pub leader_id: UserId,
}

#[derive(Debug, Clone, Serialize)]
pub struct DepartmentResponse {
    pub id: DepartmentId,
    pub name: String,
    pub leader_id: UserId,
}

impl From<&Department> for DepartmentResponse {
    fn from(department: &Department) -> Self {
        Self {
            id: department.id(),
            name: department.name().to_string(),
            leader_id: department.leader_id().clone(),
        }
    }
}

#[derive(Clone)]
pub struct DepartmentHandlers {
    departments: Arc<DepartmentHandler>,
}

impl DepartmentHandlers {
    pub fn new(ports: &ApiPorts) -> Self {
        Self {
            departments: Arc::new(DepartmentHandler::new(ports.directory.clone())),
        }
    }
}

/// GET /api/departments - With leader names and member counts
pub async fn list_departments(
    State(handlers): State<DepartmentHandlers>,
    RequireAuth(user): RequireAuth,
) -> Response {
    match handlers
        .departments
        .list(ListDepartmentsQuery { actor: user.actor() })
        .await
    {
        Ok(views) => (StatusCode::OK, Json(views)).into_response(),
        Err(e) => handle_domain_error(e),
    }
}

/// POST /api/departments
pub async fn create_department(
    State(handlers): State<DepartmentHandlers>,
    RequireAuth(user): RequireAuth,
    ApiJson(req): ApiJson<SaveDepartmentRequest>,
) -> Response {
    let cmd = SaveDepartmentCommand {
        department_id: None,
        name: req.name,
        leader_id: req.leader_id,
    };
    match handlers.departments.save(cmd, metadata_for(&user)).await {
        Ok(department) => {
            (StatusCode::CREATED, Json(DepartmentResponse::from(&department))).into_response()
        }
        Err(e) => handle_domain_error(e),
    }
}

/// PUT /api/departments/:id
pub async fn update_department(
    State(handlers): State<DepartmentHandlers>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<SaveDepartmentRequest>,
) -> Response {
    let department_id: DepartmentId = match parse_param("department ID", &id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let cmd = SaveDepartmentCommand {
        department_id: Some(department_id),
        name: req.name,
        leader_id: req.leader_id,
    };
    match handlers.departments.save(cmd, metadata_for(&user)).await {
        Ok(department) => {
            (StatusCode::OK, Json(DepartmentResponse::from(&department))).into_response()
        }
        Err(e) => handle_domain_error(e),
    }
}

/// DELETE /api/departments/:id - Members are left without a department
pub async fn delete_department(
    State(handlers): State<DepartmentHandlers>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
) -> Response {
    let department_id: DepartmentId = match parse_param("department ID", &id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match handlers
        .departments
        .delete(DeleteDepartmentCommand { department_id }, metadata_for(&user))
        .await
    {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => handle_domain_error(e),
    }
}

/// Creates the department router, mounted at `/api/departments`.
pub fn department_routes(handlers: DepartmentHandlers) -> Router {
    Router::new()
        .route("/", get(list_departments).post(create_department))
        .route("/:id", put(update_department).delete(delete_department))
        .with_state(handlers)
}
