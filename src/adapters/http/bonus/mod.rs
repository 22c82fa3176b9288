//! HTTP adapter for the two bonus tier tables.
//!
//! Bodies are plain rule lists; `BonusTable` serializes transparently.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};

use crate::adapters::http::error::handle_report_error;
use crate::adapters::http::extract::ApiJson;
use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::reviews::metadata_for;
use crate::adapters::http::ApiPorts;
use crate::application::handlers::bonus::{
    GetBonusParametersHandler, GetBonusParametersQuery, UpdateBonusParametersHandler,
    UpdateKpiRulesCommand, UpdatePerformanceRulesCommand,
};
use crate::domain::bonus::{KpiBonusRule, PerformanceBonusRule};

#[derive(Clone)]
pub struct BonusHandlers {
    get: Arc<GetBonusParametersHandler>,
    update: Arc<UpdateBonusParametersHandler>,
}

impl BonusHandlers {
    pub fn new(ports: &ApiPorts) -> Self {
        Self {
            get: Arc::new(GetBonusParametersHandler::new(ports.bonus.clone())),
            update: Arc::new(UpdateBonusParametersHandler::new(
                ports.bonus.clone(),
                ports.event_publisher.clone(),
            )),
        }
    }
}

/// GET /api/bonus/performance-rules
pub async fn get_performance_rules(
    State(handlers): State<BonusHandlers>,
    RequireAuth(user): RequireAuth,
) -> Response {
    let query = GetBonusParametersQuery { actor: user.actor() };
    match handlers.get.performance_rules(query).await {
        Ok(table) => (StatusCode::OK, Json(table)).into_response(),
        Err(e) => handle_report_error(e),
    }
}

/// PUT /api/bonus/performance-rules
pub async fn update_performance_rules(
    State(handlers): State<BonusHandlers>,
    RequireAuth(user): RequireAuth,
    ApiJson(rules): ApiJson<Vec<PerformanceBonusRule>>,
) -> Response {
    let cmd = UpdatePerformanceRulesCommand { rules };
    match handlers
        .update
        .update_performance_rules(cmd, metadata_for(&user))
        .await
    {
        Ok(table) => (StatusCode::OK, Json(table)).into_response(),
        Err(e) => handle_report_error(e),
    }
}

/// GET /api/bonus/kpi-rules
pub async fn get_kpi_rules(
    State(handlers): State<BonusHandlers>,
    RequireAuth(user): RequireAuth,
) -> Response {
    let query = GetBonusParametersQuery { actor: user.actor() };
    match handlers.get.kpi_rules(query).await {
        Ok(table) => (StatusCode::OK, Json(table)).into_response(),
        Err(e) => handle_report_error(e),
    }
}

/// PUT /api/bonus/kpi-rules
pub async fn update_kpi_rules(
    State(handlers): State<BonusHandlers>,
    RequireAuth(user): RequireAuth,
    ApiJson(rules): ApiJson<Vec<KpiBonusRule>>,
) -> Response {
    let cmd = UpdateKpiRulesCommand { rules };
    match handlers.update.update_kpi_rules(cmd, metadata_for(&user)).await {
        Ok(table) => (StatusCode::OK, Json(table)).into_response(),
        Err(e) => handle_report_error(e),
    }
}

/// Creates the bonus router, mounted at `/api/bonus`.
pub fn bonus_routes(handlers: BonusHandlers) -> Router {
    Router::new()
        .route(
            "/performance-rules",
            get(get_performance_rules).put(update_performance_rules),
        )
        .route("/kpi-rules", get(get_kpi_rules).put(update_kpi_rules))
        .with_state(handlers)
}
