//! Top-level router assembly.

use std::time::Duration;

use axum::{http::HeaderValue, middleware, routing::get, Json, Router};
use serde_json::json;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use super::bonus::{bonus_routes, BonusHandlers};
use super::departments::{department_routes, DepartmentHandlers};
use super::diary::{diary_routes, DiaryHandlers};
use super::employees::{employee_routes, EmployeeHandlers};
use super::kpi::{kpi_routes, KpiHandlers};
use super::middleware::{auth_middleware, AuthState};
use super::reports::{report_routes, ReportHandlers};
use super::reviews::{review_routes, ReviewHandlers};
use super::templates::{template_routes, TemplateHandlers};
use super::ApiPorts;

/// Cross-cutting HTTP settings, normally taken from `ServerConfig`.
#[derive(Debug, Clone)]
pub struct RouterSettings {
    pub request_timeout: Duration,
    /// Empty means any origin.
    pub cors_origins: Vec<String>,
}

impl Default for RouterSettings {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(30),
            cors_origins: Vec::new(),
        }
    }
}

/// Builds the full application router.
///
/// `/health` is public. Everything under `/api` requires a bearer token.
pub fn api_router(ports: ApiPorts, settings: RouterSettings) -> Router {
    let auth_state: AuthState = ports.session_validator.clone();

    let api = Router::new()
        .nest("/reviews", review_routes(ReviewHandlers::new(&ports)))
        .nest("/templates", template_routes(TemplateHandlers::new(&ports)))
        .nest("/diary", diary_routes(DiaryHandlers::new(&ports)))
        .nest("/kpi", kpi_routes(KpiHandlers::new(&ports)))
        .nest("/bonus", bonus_routes(BonusHandlers::new(&ports)))
        .nest("/reports", report_routes(ReportHandlers::new(&ports)))
        .nest("/departments", department_routes(DepartmentHandlers::new(&ports)))
        .nest("/employees", employee_routes(EmployeeHandlers::new(&ports)))
        .layer(middleware::from_fn_with_state(auth_state, auth_middleware));

    Router::new()
        .route("/health", get(health))
        .nest("/api", api)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(cors_layer(&settings.cors_origins))
                .layer(TimeoutLayer::new(settings.request_timeout))
                .layer(CompressionLayer::new()),
        )
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    let parsed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    if parsed.is_empty() {
        layer.allow_origin(Any)
    } else {
        layer.allow_origin(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use crate::adapters::ai::DisabledFeedbackGenerator;
    use crate::adapters::auth::MockSessionValidator;
    use crate::adapters::events::InMemoryEventBus;
    use crate::adapters::memory::InMemoryStore;
    use crate::domain::foundation::Role;

    fn router() -> Router {
        let validator =
            MockSessionValidator::new().with_test_user("admin-token", "admin", Role::Administrator);
        let ports = ApiPorts::in_memory(
            Arc::new(InMemoryStore::new()),
            Arc::new(InMemoryEventBus::new()),
            Arc::new(DisabledFeedbackGenerator),
            Arc::new(validator),
        );
        api_router(ports, RouterSettings::default())
    }

    #[tokio::test]
    async fn health_is_public() {
        let response = router()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key("x-request-id"));
    }

    #[tokio::test]
    async fn api_requires_bearer_token() {
        let response = router()
            .oneshot(Request::get("/api/bonus/kpi-rules").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn default_kpi_rules_are_served() {
        let response = router()
            .oneshot(
                Request::get("/api/bonus/kpi-rules")
                    .header("authorization", "Bearer admin-token")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let rules: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(rules.as_array().map(Vec::len), Some(3));
        assert_eq!(rules[2]["bonus_value_leader"], 500.0);
    }

    #[test]
    fn invalid_cors_origins_are_skipped() {
        let _ = cors_layer(&["http://ok.example".to_string(), "bad\norigin".to_string()]);
    }
}
