//! Shared fixtures for handler tests.

use std::sync::Arc;

use crate::adapters::events::InMemoryEventBus;
use crate::adapters::memory::{DirectorySeed, InMemoryStore};
use crate::domain::foundation::{CommandMetadata, Period, Role, UserId};
use crate::domain::org::{Department, Employee};
use crate::domain::review::{
    ItemScore, ItemScores, PerformanceReview, ReviewSubject, ReviewSubmission, ReviewTemplate,
    TemplateAssignment,
};
use crate::ports::{ReviewRepository, TemplateRepository};

pub const ADMIN: &str = "admin-1";
pub const MANAGER: &str = "mgr-1";
pub const OTHER_MANAGER: &str = "mgr-2";
pub const ANA: &str = "emp-1";
pub const BRUNO: &str = "emp-2";
pub const CARLA: &str = "emp-3";

pub fn uid(id: &str) -> UserId {
    UserId::new(id).unwrap()
}

/// Org with two departments:
/// - Vendas, led by `mgr-1`, with Ana and Bruno
/// - Operações, led by `mgr-2`, with Carla
///
/// plus a three-item template assigned to `mgr-1`.
pub struct TestEnv {
    pub store: Arc<InMemoryStore>,
    pub bus: Arc<InMemoryEventBus>,
    pub sales: Department,
    pub ops: Department,
    pub template: ReviewTemplate,
}

impl TestEnv {
    pub async fn new() -> Self {
        let sales = Department::new("Vendas", uid(MANAGER)).unwrap();
        let ops = Department::new("Operações", uid(OTHER_MANAGER)).unwrap();
        let employees = vec![
            Employee::new(uid(ADMIN), "Admin", "admin@humance.test", Role::Administrator, None),
            Employee::new(uid(MANAGER), "Marta", "marta@humance.test", Role::Manager, None),
            Employee::new(uid(OTHER_MANAGER), "Nuno", "nuno@humance.test", Role::Manager, None),
            Employee::new(uid(ANA), "Ana", "ana@humance.test", Role::Collaborator, Some(sales.id())),
            Employee::new(uid(BRUNO), "Bruno", "bruno@humance.test", Role::Collaborator, Some(sales.id())),
            Employee::new(uid(CARLA), "Carla", "carla@humance.test", Role::Collaborator, Some(ops.id())),
        ];
        let store = Arc::new(InMemoryStore::with_directory(DirectorySeed {
            employees,
            departments: vec![sales.clone(), ops.clone()],
        }));

        let template = ReviewTemplate::new(
            "Avaliação Mensal",
            vec![
                "Pontualidade".to_string(),
                "Trabalho em equipe".to_string(),
                "Qualidade técnica".to_string(),
            ],
        )
        .unwrap();
        store.save(&template).await.unwrap();
        store
            .assign(&TemplateAssignment::new(template.id(), vec![uid(MANAGER)]))
            .await
            .unwrap();

        Self {
            store,
            bus: Arc::new(InMemoryEventBus::new()),
            sales,
            ops,
            template,
        }
    }

    /// Stores a pending review of `employee` in `period`.
    pub async fn open_review(&self, employee: &str, period: Period) -> PerformanceReview {
        let (department, manager) = match employee {
            CARLA => (&self.ops, OTHER_MANAGER),
            _ => (&self.sales, MANAGER),
        };
        let name = match employee {
            ANA => "Ana",
            BRUNO => "Bruno",
            CARLA => "Carla",
            other => other,
        };
        let review = PerformanceReview::open(
            ReviewSubject {
                employee_id: uid(employee),
                employee_name: name.to_string(),
                employee_role: Role::Collaborator,
                department_id: Some(department.id()),
                department_name: Some(department.name().to_string()),
                manager_id: uid(manager),
            },
            self.template.id(),
            self.template.name(),
            period,
        );
        assert!(self.store.insert_if_absent(&review).await.unwrap());
        review
    }

    /// Stores a review of `employee` that is awaiting approval with `scores`.
    pub async fn submitted_review(
        &self,
        employee: &str,
        period: Period,
        scores: &[u8],
    ) -> PerformanceReview {
        let mut review = self.open_review(employee, period).await;
        review.submit(submission(scores), scores.len()).unwrap();
        self.store.update(&review).await.unwrap();
        review
    }
}

pub fn scores(values: &[u8]) -> ItemScores {
    values
        .iter()
        .enumerate()
        .map(|(i, v)| (i, ItemScore::new(*v).unwrap()))
        .collect()
}

pub fn submission(values: &[u8]) -> ReviewSubmission {
    ReviewSubmission {
        scores: scores(values),
        feedback_for_employee: "Muito bom trabalho ao longo do mês, continue assim.".to_string(),
        manager_observations: None,
    }
}

pub fn admin() -> CommandMetadata {
    CommandMetadata::test_as(ADMIN, Role::Administrator)
}

pub fn manager() -> CommandMetadata {
    CommandMetadata::test_as(MANAGER, Role::Manager)
}

pub fn other_manager() -> CommandMetadata {
    CommandMetadata::test_as(OTHER_MANAGER, Role::Manager)
}

pub fn collaborator(id: &str) -> CommandMetadata {
    CommandMetadata::test_as(id, Role::Collaborator)
}

pub fn period(s: &str) -> Period {
    s.parse().unwrap()
}
