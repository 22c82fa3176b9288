//! In-memory persistence.
//!
//! A single [`InMemoryStore`] implements every persistence port. It backs the
//! `memory` database backend and the handler tests. State lives behind one
//! `RwLock`, so multi-entity commits are atomic with respect to other callers.

mod bonus;
mod dashboard;
mod kpi;
mod observations;
mod org;
mod reviews;
mod templates;

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::Deserialize;

use crate::domain::bonus::{BonusTable, KpiBonusRule, PerformanceBonusRule};
use crate::domain::foundation::{
    DepartmentId, DomainError, ErrorCode, KpiAssessmentId, ReviewId, TemplateId, UserId,
};
use crate::domain::kpi::{KpiAssessment, KpiModel};
use crate::domain::org::{Department, Employee};
use crate::domain::reports::EmployeeOfTheMonth;
use crate::domain::review::{DiaryEntry, PerformanceReview, ReviewTemplate, WeeklyObservation};

#[derive(Default)]
struct StoreState {
    employees: Vec<Employee>,
    departments: Vec<Department>,
    reviews: HashMap<ReviewId, PerformanceReview>,
    templates: Vec<ReviewTemplate>,
    assignments: HashMap<TemplateId, Vec<UserId>>,
    weekly: Vec<WeeklyObservation>,
    diary: Vec<DiaryEntry>,
    kpi_models: HashMap<DepartmentId, KpiModel>,
    assessments: HashMap<KpiAssessmentId, KpiAssessment>,
    performance_rules: Option<BonusTable<PerformanceBonusRule>>,
    kpi_rules: Option<BonusTable<KpiBonusRule>>,
    employee_of_the_month: Option<EmployeeOfTheMonth>,
}

/// Directory contents loaded at startup for the memory backend.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DirectorySeed {
    #[serde(default)]
    pub employees: Vec<Employee>,
    #[serde(default)]
    pub departments: Vec<Department>,
}

/// Process-local implementation of all persistence ports.
#[derive(Default)]
pub struct InMemoryStore {
    state: RwLock<StoreState>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store whose org directory holds `seed`.
    pub fn with_directory(seed: DirectorySeed) -> Self {
        Self {
            state: RwLock::new(StoreState {
                employees: seed.employees,
                departments: seed.departments,
                ..StoreState::default()
            }),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, StoreState>, DomainError> {
        self.state.read().map_err(poisoned)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, StoreState>, DomainError> {
        self.state.write().map_err(poisoned)
    }
}

fn poisoned<T>(_: PoisonError<T>) -> DomainError {
    DomainError::new(ErrorCode::InternalError, "In-memory store lock poisoned")
}
