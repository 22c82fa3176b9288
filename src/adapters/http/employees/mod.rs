//! HTTP adapter for directory maintenance.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, put},
    Json, Router,
};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::adapters::http::error::{handle_domain_error, parse_param};
use crate::adapters::http::extract::ApiJson;
use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::reviews::metadata_for;
use crate::adapters::http::ApiPorts;
use crate::application::handlers::org::{
    DeleteEmployeeCommand, EmployeeHandler, ListEmployeesQuery, SaveEmployeeCommand,
};
use crate::domain::foundation::{DepartmentId, Role, UserId};

#[derive(Debug, Clone, Deserialize)]
pub struct SaveEmployeeRequest {
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(default)]
    pub department_id: Option<DepartmentId>,
    #[serde(default)]
    pub birth_date: Option<NaiveDate>,
}

#[derive(Clone)]
pub struct EmployeeHandlers {
    employees: Arc<EmployeeHandler>,
}

impl EmployeeHandlers {
    pub fn new(ports: &ApiPorts) -> Self {
        Self {
            employees: Arc::new(EmployeeHandler::new(ports.directory.clone())),
        }
    }
}

/// GET /api/employees
pub async fn list_employees(
    State(handlers): State<EmployeeHandlers>,
    RequireAuth(user): RequireAuth,
) -> Response {
    match handlers
        .employees
        .list(ListEmployeesQuery { actor: user.actor() })
        .await
    {
        Ok(employees) => (StatusCode::OK, Json(employees)).into_response(),
        Err(e) => handle_domain_error(e),
    }
}

/// PUT /api/employees/:id - Creates or replaces the record
pub async fn save_employee(
    State(handlers): State<EmployeeHandlers>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<SaveEmployeeRequest>,
) -> Response {
    let employee_id: UserId = match parse_param("employee ID", &id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let cmd = SaveEmployeeCommand {
        employee_id,
        name: req.name,
        email: req.email,
        role: req.role,
        department_id: req.department_id,
        birth_date: req.birth_date,
    };
    match handlers.employees.save(cmd, metadata_for(&user)).await {
        Ok(employee) => (StatusCode::OK, Json(employee)).into_response(),
        Err(e) => handle_domain_error(e),
    }
}

/// DELETE /api/employees/:id
pub async fn delete_employee(
    State(handlers): State<EmployeeHandlers>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
) -> Response {
    let employee_id: UserId = match parse_param("employee ID", &id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match handlers
        .employees
        .delete(DeleteEmployeeCommand { employee_id }, metadata_for(&user))
        .await
    {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => handle_domain_error(e),
    }
}

/// Creates the employee router, mounted at `/api/employees`.
pub fn employee_routes(handlers: EmployeeHandlers) -> Router {
    Router::new()
        .route("/", get(list_employees))
        .route("/:id", put(save_employee).delete(delete_employee))
        .with_state(handlers)
}
