//! HTTP adapter for reports and dashboard widgets.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use crate::adapters::http::error::{handle_report_error, parse_optional, parse_param};
use crate::adapters::http::extract::{ApiJson, ApiQuery};
use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::reviews::metadata_for;
use crate::adapters::http::ApiPorts;
use crate::application::handlers::reports::{
    BonusReportHandler, BonusReportQuery, DashboardHandler, EmployeeOfTheMonthHandler,
    EmployeeOfTheMonthQuery, LeaderboardHandler, LeaderboardQuery, PerformanceHistoryHandler,
    PerformanceHistoryQuery, ReviewSummaryQuery, TeamHighlightQuery,
    UpdateEmployeeOfTheMonthCommand,
};
use crate::domain::foundation::{Period, UserId};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReportParams {
    /// Defaults to the current month.
    pub period: Option<String>,
    pub department_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateEmployeeOfTheMonthRequest {
    pub name: String,
    pub role: String,
    pub reason: String,
    #[serde(default)]
    pub image_url: Option<String>,
}

#[derive(Clone)]
pub struct ReportHandlers {
    leaderboard: Arc<LeaderboardHandler>,
    bonus_report: Arc<BonusReportHandler>,
    history: Arc<PerformanceHistoryHandler>,
    dashboard: Arc<DashboardHandler>,
    employee_of_the_month: Arc<EmployeeOfTheMonthHandler>,
}

impl ReportHandlers {
    pub fn new(ports: &ApiPorts) -> Self {
        Self {
            leaderboard: Arc::new(LeaderboardHandler::new(
                ports.reviews.clone(),
                ports.directory.clone(),
                ports.bonus.clone(),
            )),
            bonus_report: Arc::new(BonusReportHandler::new(
                ports.reviews.clone(),
                ports.directory.clone(),
                ports.bonus.clone(),
            )),
            history: Arc::new(PerformanceHistoryHandler::new(
                ports.reviews.clone(),
                ports.directory.clone(),
            )),
            dashboard: Arc::new(DashboardHandler::new(
                ports.reviews.clone(),
                ports.directory.clone(),
            )),
            employee_of_the_month: Arc::new(EmployeeOfTheMonthHandler::new(
                ports.reviews.clone(),
                ports.directory.clone(),
                ports.dashboard.clone(),
            )),
        }
    }
}

fn period_or_current(raw: Option<&str>) -> Result<Period, Response> {
    Ok(parse_optional("period", raw)?.unwrap_or_else(Period::current))
}

/// GET /api/reports/leaderboard
pub async fn leaderboard(
    State(handlers): State<ReportHandlers>,
    RequireAuth(user): RequireAuth,
    ApiQuery(params): ApiQuery<ReportParams>,
) -> Response {
    let period = match period_or_current(params.period.as_deref()) {
        Ok(p) => p,
        Err(response) => return response,
    };

    let query = LeaderboardQuery {
        actor: user.actor(),
        period,
    };
    match handlers.leaderboard.handle(query).await {
        Ok(rows) => (StatusCode::OK, Json(rows)).into_response(),
        Err(e) => handle_report_error(e),
    }
}

/// GET /api/reports/bonus
pub async fn bonus_report(
    State(handlers): State<ReportHandlers>,
    RequireAuth(user): RequireAuth,
    ApiQuery(params): ApiQuery<ReportParams>,
) -> Response {
    let period = match period_or_current(params.period.as_deref()) {
        Ok(p) => p,
        Err(response) => return response,
    };
    let department_id = match parse_optional("department ID", params.department_id.as_deref()) {
        Ok(d) => d,
        Err(response) => return response,
    };

    let query = BonusReportQuery {
        actor: user.actor(),
        period,
        department_id,
    };
    match handlers.bonus_report.handle(query).await {
        Ok(rows) => (StatusCode::OK, Json(rows)).into_response(),
        Err(e) => handle_report_error(e),
    }
}

/// GET /api/reports/history/:employee_id
pub async fn performance_history(
    State(handlers): State<ReportHandlers>,
    RequireAuth(user): RequireAuth,
    Path(employee_id): Path<String>,
) -> Response {
    let employee_id: UserId = match parse_param("employee ID", &employee_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let query = PerformanceHistoryQuery {
        actor: user.actor(),
        employee_id,
    };
    match handlers.history.handle(query).await {
        Ok(points) => (StatusCode::OK, Json(points)).into_response(),
        Err(e) => handle_report_error(e),
    }
}

/// GET /api/reports/review-summary
pub async fn review_summary(
    State(handlers): State<ReportHandlers>,
    RequireAuth(user): RequireAuth,
    ApiQuery(params): ApiQuery<ReportParams>,
) -> Response {
    let period = match period_or_current(params.period.as_deref()) {
        Ok(p) => p,
        Err(response) => return response,
    };

    let query = ReviewSummaryQuery {
        actor: user.actor(),
        period,
    };
    match handlers.dashboard.review_summary(query).await {
        Ok(rows) => (StatusCode::OK, Json(rows)).into_response(),
        Err(e) => handle_report_error(e),
    }
}

/// GET /api/reports/team-highlight - `null` when nobody qualifies
pub async fn team_highlight(
    State(handlers): State<ReportHandlers>,
    RequireAuth(user): RequireAuth,
    ApiQuery(params): ApiQuery<ReportParams>,
) -> Response {
    let period = match period_or_current(params.period.as_deref()) {
        Ok(p) => p,
        Err(response) => return response,
    };

    let query = TeamHighlightQuery {
        actor: user.actor(),
        period,
    };
    match handlers.dashboard.team_highlight(query).await {
        Ok(highlight) => (StatusCode::OK, Json(highlight)).into_response(),
        Err(e) => handle_report_error(e),
    }
}

/// GET /api/reports/employee-of-the-month - `null` for a manager without a highlight
pub async fn employee_of_the_month(
    State(handlers): State<ReportHandlers>,
    RequireAuth(user): RequireAuth,
    ApiQuery(params): ApiQuery<ReportParams>,
) -> Response {
    let period = match period_or_current(params.period.as_deref()) {
        Ok(p) => p,
        Err(response) => return response,
    };

    let query = EmployeeOfTheMonthQuery {
        actor: user.actor(),
        period,
    };
    match handlers.employee_of_the_month.get(query).await {
        Ok(card) => (StatusCode::OK, Json(card)).into_response(),
        Err(e) => handle_report_error(e),
    }
}

/// PUT /api/reports/employee-of-the-month
pub async fn update_employee_of_the_month(
    State(handlers): State<ReportHandlers>,
    RequireAuth(user): RequireAuth,
    ApiJson(req): ApiJson<UpdateEmployeeOfTheMonthRequest>,
) -> Response {
    let cmd = UpdateEmployeeOfTheMonthCommand {
        name: req.name,
        role: req.role,
        reason: req.reason,
        image_url: req.image_url,
    };
    match handlers
        .employee_of_the_month
        .update(cmd, metadata_for(&user))
        .await
    {
        Ok(card) => (StatusCode::OK, Json(card)).into_response(),
        Err(e) => handle_report_error(e),
    }
}

/// Creates the report router, mounted at `/api/reports`.
pub fn report_routes(handlers: ReportHandlers) -> Router {
    Router::new()
        .route("/leaderboard", get(leaderboard))
        .route("/bonus", get(bonus_report))
        .route("/history/:employee_id", get(performance_history))
        .route("/review-summary", get(review_summary))
        .route("/team-highlight", get(team_highlight))
        .route(
            "/employee-of-the-month",
            get(employee_of_the_month).put(update_employee_of_the_month),
        )
        .with_state(handlers)
}
