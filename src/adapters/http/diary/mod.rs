//! HTTP adapter for the manager's diary.
//!
//! Entries are observations filed under an employee's current review, so a
//! post here may open that review.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use crate::adapters::http::error::{handle_review_error, parse_optional};
use crate::adapters::http::extract::{ApiJson, ApiQuery};
use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::reviews::metadata_for;
use crate::adapters::http::ApiPorts;
use crate::application::handlers::observation::{
    AddObservationForUserCommand, AddObservationForUserHandler, ListDiaryHandler, ListDiaryQuery,
};
use crate::domain::foundation::{Period, UserId};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DiaryParams {
    /// Defaults to the current month.
    pub period: Option<String>,
    pub employee_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AddDiaryEntryRequest {
    pub employee_id: UserId,
    pub text: String,
}

#[derive(Clone)]
pub struct DiaryHandlers {
    add: Arc<AddObservationForUserHandler>,
    list: Arc<ListDiaryHandler>,
}

impl DiaryHandlers {
    pub fn new(ports: &ApiPorts) -> Self {
        Self {
            add: Arc::new(AddObservationForUserHandler::new(
                ports.reviews.clone(),
                ports.templates.clone(),
                ports.observations.clone(),
                ports.directory.clone(),
                ports.event_publisher.clone(),
            )),
            list: Arc::new(ListDiaryHandler::new(ports.observations.clone())),
        }
    }
}

/// GET /api/diary - Entries created in the period, newest first
pub async fn list_diary(
    State(handlers): State<DiaryHandlers>,
    RequireAuth(user): RequireAuth,
    ApiQuery(params): ApiQuery<DiaryParams>,
) -> Response {
    let period: Option<Period> = match parse_optional("period", params.period.as_deref()) {
        Ok(p) => p,
        Err(response) => return response,
    };
    let employee_id = match parse_optional("employee ID", params.employee_id.as_deref()) {
        Ok(e) => e,
        Err(response) => return response,
    };

    let query = ListDiaryQuery {
        actor: user.actor(),
        period: period.unwrap_or_else(Period::current),
        employee_id,
    };

    match handlers.list.handle(query).await {
        Ok(entries) => (StatusCode::OK, Json(entries)).into_response(),
        Err(e) => handle_review_error(e),
    }
}

/// POST /api/diary - Note about an employee, opening their review if needed
pub async fn add_diary_entry(
    State(handlers): State<DiaryHandlers>,
    RequireAuth(user): RequireAuth,
    ApiJson(req): ApiJson<AddDiaryEntryRequest>,
) -> Response {
    let cmd = AddObservationForUserCommand {
        employee_id: req.employee_id,
        text: req.text,
    };

    match handlers.add.handle(cmd, metadata_for(&user)).await {
        Ok(entry) => (StatusCode::CREATED, Json(entry)).into_response(),
        Err(e) => handle_review_error(e),
    }
}

/// Creates the diary router, mounted at `/api/diary`.
pub fn diary_routes(handlers: DiaryHandlers) -> Router {
    Router::new()
        .route("/", get(list_diary).post(add_diary_entry))
        .with_state(handlers)
}
