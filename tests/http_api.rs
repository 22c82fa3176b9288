//! End-to-end tests for the REST surface.
//!
//! These tests drive the full axum router against the in-memory store:
//! 1. Templates are created and assigned by an administrator
//! 2. A manager opens and submits reviews for their team
//! 3. KPI results complete reviews and feed the bonus report
//! 4. Deleting an assessment clears the KPI scores it wrote

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use humance::adapters::ai::DisabledFeedbackGenerator;
use humance::adapters::auth::MockSessionValidator;
use humance::adapters::http::{api_router, ApiPorts, RouterSettings};
use humance::adapters::{DirectorySeed, InMemoryEventBus, InMemoryStore};
use humance::domain::foundation::{DepartmentId, Role, UserId};
use humance::domain::org::{Department, Employee};

// =============================================================================
// Test Infrastructure
// =============================================================================

const ADMIN: &str = "admin-token";
const MANAGER: &str = "gabi-token";
const COLLABORATOR: &str = "ana-token";

struct TestApp {
    router: Router,
    events: Arc<InMemoryEventBus>,
    department_id: DepartmentId,
}

fn uid(id: &str) -> UserId {
    UserId::new(id).unwrap()
}

fn test_app() -> TestApp {
    let sales = Department::new("Vendas", uid("gabi")).unwrap();
    let department_id = sales.id();
    let seed = DirectorySeed {
        employees: vec![
            Employee::new(uid("root"), "Rita Admin", "rita@x", Role::Administrator, None),
            Employee::new(uid("gabi"), "Gabi", "gabi@x", Role::Manager, Some(department_id)),
            Employee::new(uid("ana"), "Ana", "ana@x", Role::Collaborator, Some(department_id)),
            Employee::new(uid("bruno"), "Bruno", "bruno@x", Role::Collaborator, Some(department_id)),
        ],
        departments: vec![sales],
    };

    let validator = MockSessionValidator::new()
        .with_test_user(ADMIN, "root", Role::Administrator)
        .with_test_user(MANAGER, "gabi", Role::Manager)
        .with_test_user(COLLABORATOR, "ana", Role::Collaborator);
    let events = Arc::new(InMemoryEventBus::new());
    let ports = ApiPorts::in_memory(
        Arc::new(InMemoryStore::with_directory(seed)),
        events.clone(),
        Arc::new(DisabledFeedbackGenerator),
        Arc::new(validator),
    );

    TestApp {
        router: api_router(ports, RouterSettings::default()),
        events,
        department_id,
    }
}

impl TestApp {
    async fn call(&self, method: Method, uri: &str, token: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder()
            .method(method)
            .uri(uri)
            .header("authorization", format!("Bearer {}", token));
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    async fn create_template(&self) -> String {
        let (status, body) = self
            .call(
                Method::POST,
                "/api/templates",
                ADMIN,
                Some(json!({
                    "name": "Avaliação mensal",
                    "items": ["Pontualidade", "Qualidade", "Trabalho em equipe"]
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["id"].as_str().unwrap().to_string()
    }

    /// Opens reviews for Ana and Bruno and returns (period, [ana, bruno] ids).
    async fn open_reviews(&self, template_id: &str) -> (String, Vec<String>) {
        let (status, body) = self
            .call(
                Method::POST,
                "/api/reviews",
                MANAGER,
                Some(json!({ "employee_ids": ["ana", "bruno"], "template_id": template_id })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        assert_eq!(body["created_count"], 2);

        let period = body["period"].as_str().unwrap().to_string();
        let ids = body["review_ids"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap().to_string())
            .collect();
        (period, ids)
    }

    async fn submit(&self, review_id: &str, scores: Value) -> (StatusCode, Value) {
        self.call(
            Method::POST,
            &format!("/api/reviews/{review_id}/submit"),
            MANAGER,
            Some(json!({
                "scores": scores,
                "feedback_for_employee": "Ótimo mês, continue focada nas entregas."
            })),
        )
        .await
    }

    async fn review(&self, review_id: &str) -> Value {
        let (status, body) = self
            .call(Method::GET, &format!("/api/reviews/{review_id}"), ADMIN, None)
            .await;
        assert_eq!(status, StatusCode::OK, "{body}");
        body["review"].clone()
    }

    async fn save_kpi_model(&self) {
        let (status, body) = self
            .call(
                Method::PUT,
                "/api/kpi/models",
                ADMIN,
                Some(json!({
                    "department_id": self.department_id,
                    "indicators": [
                        {"indicator_name": "Vendas totais", "weight": 6.0, "goal": 100.0, "type": "accelerator", "condition": "above"},
                        {"indicator_name": "Reclamações", "weight": 2.0, "goal": 5.0, "type": "detractor", "condition": "below"},
                        {"indicator_name": "Ticket médio", "weight": 4.0, "goal": 50.0, "type": "accelerator", "condition": "above"}
                    ]
                })),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "{body}");
    }

    async fn process_kpi(&self, period: &str, results: Value) -> Value {
        let (status, body) = self
            .call(
                Method::POST,
                "/api/kpi/assessments",
                ADMIN,
                Some(json!({
                    "department_id": self.department_id,
                    "period": period,
                    "results": results
                })),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "{body}");
        body
    }
}

// =============================================================================
// Review lifecycle
// =============================================================================

#[tokio::test]
async fn review_moves_through_adjustment_to_approval() {
    let app = test_app();
    let template_id = app.create_template().await;
    let (_, ids) = app.open_reviews(&template_id).await;
    let ana = &ids[0];

    let (status, body) = app.submit(ana, json!({"0": 8, "1": 6, "2": 10})).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["review"]["status"], "awaiting_approval");
    assert_eq!(body["review"]["average_score"], 8.0);

    let (status, body) = app
        .call(
            Method::POST,
            &format!("/api/reviews/{ana}/request-adjustment"),
            ADMIN,
            Some(json!({ "feedback_for_manager": "Detalhe melhor a nota de qualidade." })),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["review"]["status"], "adjustment_requested");

    let (status, body) = app.submit(ana, json!({"0": 8, "1": 8, "2": 8})).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert!(body["review"]["admin_feedback_for_manager"].is_null());

    let (status, body) = app
        .call(Method::POST, &format!("/api/reviews/{ana}/approve"), ADMIN, None)
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["review"]["status"], "completed");

    // Completed reviews are frozen
    let (status, body) = app.submit(ana, json!({"0": 1, "1": 1, "2": 1})).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "REVIEW_COMPLETED");

    assert!(app.events.has_event("review.approved.v1"));
}

#[tokio::test]
async fn reopening_reviews_in_same_period_skips_existing() {
    let app = test_app();
    let template_id = app.create_template().await;
    app.open_reviews(&template_id).await;

    let (status, body) = app
        .call(
            Method::POST,
            "/api/reviews",
            MANAGER,
            Some(json!({ "employee_ids": ["ana", "bruno"], "template_id": template_id })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["created_count"], 0);
    assert_eq!(body["skipped_count"], 2);
}

#[tokio::test]
async fn incomplete_scores_are_rejected() {
    let app = test_app();
    let template_id = app.create_template().await;
    let (_, ids) = app.open_reviews(&template_id).await;

    let (status, body) = app.submit(&ids[0], json!({"0": 8, "1": 6})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");

    let (status, body) = app.submit(&ids[0], json!({"0": 8, "1": 6, "2": 11})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_FAILED");
    assert_eq!(body["details"]["field"], "scores.2");
}

#[tokio::test]
async fn collaborators_cannot_manage_configuration() {
    let app = test_app();

    let (status, body) = app
        .call(Method::GET, "/api/bonus/kpi-rules", COLLABORATOR, None)
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "FORBIDDEN");

    let (status, _) = app
        .call(
            Method::POST,
            "/api/templates",
            MANAGER,
            Some(json!({ "name": "Nope", "items": ["Item um"] })),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn malformed_path_ids_are_bad_requests() {
    let app = test_app();
    let (status, body) = app
        .call(Method::GET, "/api/reviews/not-a-uuid", ADMIN, None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "BAD_REQUEST");
}

// =============================================================================
// KPI processing and bonus
// =============================================================================

#[tokio::test]
async fn kpi_processing_completes_submitted_reviews_and_replaces_snapshot() {
    let app = test_app();
    let template_id = app.create_template().await;
    let (period, ids) = app.open_reviews(&template_id).await;
    let (ana, bruno) = (&ids[0], &ids[1]);
    app.submit(ana, json!({"0": 8, "1": 6, "2": 10})).await;
    app.save_kpi_model().await;

    // 6 (sales met) - 2 (complaints missed) + 0 (ticket missed)
    let first = app.process_kpi(&period, json!({"0": 120, "1": 9, "2": 40})).await;
    assert_eq!(first["success"], true);
    assert_eq!(first["kpi_score"], 4.0);
    assert_eq!(first["reviews_affected_count"], 2);
    assert_eq!(first["reviews_completed"], 1);

    // Reprocessing the same department and period keeps one snapshot
    let second = app.process_kpi(&period, json!({"0": 120, "1": 3, "2": 60})).await;
    assert_eq!(second["kpi_score"], 10.0);
    assert_eq!(second["reviews_completed"], 0);

    let (status, list) = app
        .call(Method::GET, &format!("/api/kpi/assessments?period={period}"), ADMIN, None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 1);
    assert_eq!(list[0]["kpi_score"], 10.0);

    let ana_review = app.review(ana).await;
    assert_eq!(ana_review["status"], "completed");
    assert_eq!(ana_review["kpi_score"], 10.0);

    let bruno_review = app.review(bruno).await;
    assert_eq!(bruno_review["status"], "pending");
    assert_eq!(bruno_review["kpi_score"], 10.0);

    // Ana: average 8 -> 100%; KPI 10 -> led column 300
    let (status, report) = app
        .call(Method::GET, &format!("/api/reports/bonus?period={period}"), ADMIN, None)
        .await;
    assert_eq!(status, StatusCode::OK);
    let rows = report.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["employee_id"], "ana");
    assert_eq!(rows[0]["performance_bonus_percentage"], 100.0);
    assert_eq!(rows[0]["base_kpi_bonus"], 300.0);
    assert_eq!(rows[0]["final_kpi_bonus"], 300.0);
}

#[tokio::test]
async fn processing_without_reviews_saves_nothing() {
    let app = test_app();
    app.save_kpi_model().await;

    let body = app.process_kpi("2020-01", json!({"0": 120})).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["kpi_score"], 6.0);
    assert_eq!(body["reviews_affected_count"], 0);
    assert!(body.get("assessment_id").is_none());

    let (_, list) = app.call(Method::GET, "/api/kpi/assessments", ADMIN, None).await;
    assert!(list.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn deleting_assessment_clears_kpi_scores_but_keeps_status() {
    let app = test_app();
    let template_id = app.create_template().await;
    let (period, ids) = app.open_reviews(&template_id).await;
    app.submit(&ids[0], json!({"0": 5, "1": 5, "2": 5})).await;
    app.save_kpi_model().await;
    let processed = app.process_kpi(&period, json!({"0": 150})).await;
    let assessment_id = processed["assessment_id"].as_str().unwrap();

    let (status, body) = app
        .call(
            Method::DELETE,
            &format!("/api/kpi/assessments/{assessment_id}"),
            ADMIN,
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["reviews_cleared"], 2);

    let review = app.review(&ids[0]).await;
    assert!(review["kpi_score"].is_null());
    assert_eq!(review["status"], "completed");

    let (status, _) = app
        .call(
            Method::DELETE,
            &format!("/api/kpi/assessments/{assessment_id}"),
            ADMIN,
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn updated_bonus_rules_are_validated_and_applied() {
    let app = test_app();

    let (status, _) = app
        .call(
            Method::PUT,
            "/api/bonus/performance-rules",
            ADMIN,
            Some(json!([
                {"min_score": 0.0, "max_score": 5.0, "bonus_percentage": 0.0},
                {"min_score": 5.0, "max_score": 10.0, "bonus_percentage": 100.0}
            ])),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = app
        .call(
            Method::PUT,
            "/api/bonus/performance-rules",
            ADMIN,
            Some(json!([
                {"min_score": 5.0, "max_score": 10.0, "bonus_percentage": 100.0},
                {"min_score": 0.0, "max_score": 4.99, "bonus_percentage": 20.0}
            ])),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body[0]["min_score"], 0.0);

    let (_, stored) = app
        .call(Method::GET, "/api/bonus/performance-rules", ADMIN, None)
        .await;
    assert_eq!(stored, body);
}

// =============================================================================
// Departments
// =============================================================================

#[tokio::test]
async fn department_crud_round_trip() {
    let app = test_app();

    let (status, created) = app
        .call(
            Method::POST,
            "/api/departments",
            ADMIN,
            Some(json!({ "name": "Financeiro", "leader_id": "gabi" })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{created}");
    let id = created["id"].as_str().unwrap();

    let (status, updated) = app
        .call(
            Method::PUT,
            &format!("/api/departments/{id}"),
            ADMIN,
            Some(json!({ "name": "Finanças", "leader_id": "gabi" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["name"], "Finanças");

    let (status, _) = app
        .call(Method::DELETE, &format!("/api/departments/{id}"), ADMIN, None)
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, list) = app.call(Method::GET, "/api/departments", ADMIN, None).await;
    assert_eq!(list.as_array().unwrap().len(), 1);
}

// =============================================================================
// Employees
// =============================================================================

#[tokio::test]
async fn administrators_maintain_the_employee_directory() {
    let app = test_app();
    let department_id = app.department_id.to_string();

    let (status, saved) = app
        .call(
            Method::PUT,
            "/api/employees/carla",
            ADMIN,
            Some(json!({
                "name": "Carla",
                "email": "carla@x",
                "role": "collaborator",
                "department_id": department_id,
            })),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{saved}");
    assert_eq!(saved["id"], "carla");

    let (_, team) = app.call(Method::GET, "/api/employees", MANAGER, None).await;
    let names: Vec<&str> = team
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["name"].as_str().unwrap())
        .collect();
    // The leader is also a member of Vendas.
    assert_eq!(names, vec!["Ana", "Bruno", "Carla", "Gabi"]);

    let (status, _) = app
        .call(Method::DELETE, "/api/employees/carla", ADMIN, None)
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, everyone) = app.call(Method::GET, "/api/employees", ADMIN, None).await;
    assert_eq!(everyone.as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn employee_directory_is_closed_to_collaborators() {
    let app = test_app();

    let (status, body) = app
        .call(
            Method::PUT,
            "/api/employees/ana",
            COLLABORATOR,
            Some(json!({ "name": "Ana", "email": "ana@x", "role": "manager" })),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "FORBIDDEN");

    let (status, _) = app.call(Method::GET, "/api/employees", COLLABORATOR, None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = app
        .call(Method::DELETE, "/api/employees/gabi", ADMIN, None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_FAILED");
}

// =============================================================================
// Employee of the month
// =============================================================================

#[tokio::test]
async fn employee_of_the_month_is_set_by_administrators() {
    let app = test_app();

    let (status, placeholder) = app
        .call(Method::GET, "/api/reports/employee-of-the-month", COLLABORATOR, None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(placeholder["reason"], "Aguardando definição do RH.");

    let card = json!({
        "name": "Bruno",
        "role": "Executivo de contas",
        "reason": "Maior carteira do trimestre.",
    });
    let (status, _) = app
        .call(
            Method::PUT,
            "/api/reports/employee-of-the-month",
            COLLABORATOR,
            Some(card.clone()),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, saved) = app
        .call(Method::PUT, "/api/reports/employee-of-the-month", ADMIN, Some(card))
        .await;
    assert_eq!(status, StatusCode::OK, "{saved}");

    for token in [ADMIN, COLLABORATOR] {
        let (_, shown) = app
            .call(Method::GET, "/api/reports/employee-of-the-month", token, None)
            .await;
        assert_eq!(shown["name"], "Bruno");
    }

    // Managers see their team's best completed review instead.
    let (status, shown) = app
        .call(Method::GET, "/api/reports/employee-of-the-month", MANAGER, None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(shown.is_null());
}
