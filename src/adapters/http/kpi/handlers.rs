//! HTTP handlers for KPI endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::{handle_kpi_error, parse_optional, parse_param};
use crate::adapters::http::extract::{ApiJson, ApiQuery};
use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::reviews::metadata_for;
use crate::adapters::http::ApiPorts;
use crate::application::handlers::kpi::{
    DeleteKpiAssessmentCommand, DeleteKpiAssessmentHandler, ListKpiAssessmentsHandler,
    ListKpiAssessmentsQuery, ListKpiModelsHandler, ListKpiModelsQuery, ProcessKpiResultsCommand,
    ProcessKpiResultsHandler, SaveKpiModelCommand, SaveKpiModelHandler,
};
use crate::domain::foundation::{KpiAssessmentId, Period};

use super::dto::{
    DeleteAssessmentResponse, ListAssessmentsParams, ProcessKpiRequest, ProcessKpiResponse,
    SaveKpiModelRequest,
};

#[derive(Clone)]
pub struct KpiHandlers {
    save_model: Arc<SaveKpiModelHandler>,
    list_models: Arc<ListKpiModelsHandler>,
    process: Arc<ProcessKpiResultsHandler>,
    list_assessments: Arc<ListKpiAssessmentsHandler>,
    delete_assessment: Arc<DeleteKpiAssessmentHandler>,
}

impl KpiHandlers {
    pub fn new(ports: &ApiPorts) -> Self {
        Self {
            save_model: Arc::new(SaveKpiModelHandler::new(
                ports.kpi_models.clone(),
                ports.directory.clone(),
            )),
            list_models: Arc::new(ListKpiModelsHandler::new(ports.kpi_models.clone())),
            process: Arc::new(ProcessKpiResultsHandler::new(
                ports.kpi_models.clone(),
                ports.kpi_assessments.clone(),
                ports.directory.clone(),
                ports.event_publisher.clone(),
            )),
            list_assessments: Arc::new(ListKpiAssessmentsHandler::new(
                ports.kpi_assessments.clone(),
            )),
            delete_assessment: Arc::new(DeleteKpiAssessmentHandler::new(
                ports.kpi_assessments.clone(),
                ports.event_publisher.clone(),
            )),
        }
    }
}

/// GET /api/kpi/models
pub async fn list_models(
    State(handlers): State<KpiHandlers>,
    RequireAuth(user): RequireAuth,
) -> Response {
    match handlers
        .list_models
        .handle(ListKpiModelsQuery { actor: user.actor() })
        .await
    {
        Ok(models) => (StatusCode::OK, Json(models)).into_response(),
        Err(e) => handle_kpi_error(e),
    }
}

/// PUT /api/kpi/models - Replace a department's indicator list
pub async fn save_model(
    State(handlers): State<KpiHandlers>,
    RequireAuth(user): RequireAuth,
    ApiJson(req): ApiJson<SaveKpiModelRequest>,
) -> Response {
    let cmd = SaveKpiModelCommand {
        department_id: req.department_id,
        indicators: req.indicators,
    };

    match handlers.save_model.handle(cmd, metadata_for(&user)).await {
        Ok(model) => (StatusCode::OK, Json(model)).into_response(),
        Err(e) => handle_kpi_error(e),
    }
}

/// POST /api/kpi/assessments - Process a department's results for a period
pub async fn process_results(
    State(handlers): State<KpiHandlers>,
    RequireAuth(user): RequireAuth,
    ApiJson(req): ApiJson<ProcessKpiRequest>,
) -> Response {
    let period: Period = match parse_param("period", &req.period) {
        Ok(p) => p,
        Err(response) => return response,
    };

    let cmd = ProcessKpiResultsCommand {
        department_id: req.department_id,
        period,
        results: req.results,
        indicators: req.indicators,
    };

    match handlers.process.handle(cmd, metadata_for(&user)).await {
        Ok(result) => (StatusCode::OK, Json(ProcessKpiResponse::from(result))).into_response(),
        Err(e) => handle_kpi_error(e),
    }
}

/// GET /api/kpi/assessments - Newest period first
pub async fn list_assessments(
    State(handlers): State<KpiHandlers>,
    RequireAuth(user): RequireAuth,
    ApiQuery(params): ApiQuery<ListAssessmentsParams>,
) -> Response {
    let period = match parse_optional("period", params.period.as_deref()) {
        Ok(p) => p,
        Err(response) => return response,
    };
    let department_id = match parse_optional("department ID", params.department_id.as_deref()) {
        Ok(d) => d,
        Err(response) => return response,
    };

    let query = ListKpiAssessmentsQuery {
        actor: user.actor(),
        period,
        department_id,
    };

    match handlers.list_assessments.handle(query).await {
        Ok(assessments) => (StatusCode::OK, Json(assessments)).into_response(),
        Err(e) => handle_kpi_error(e),
    }
}

/// DELETE /api/kpi/assessments/:id - Retracts the score from affected reviews
pub async fn delete_assessment(
    State(handlers): State<KpiHandlers>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
) -> Response {
    let assessment_id: KpiAssessmentId = match parse_param("assessment ID", &id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match handlers
        .delete_assessment
        .handle(DeleteKpiAssessmentCommand { assessment_id }, metadata_for(&user))
        .await
    {
        Ok(reviews_cleared) => {
            (StatusCode::OK, Json(DeleteAssessmentResponse { reviews_cleared })).into_response()
        }
        Err(e) => handle_kpi_error(e),
    }
}
