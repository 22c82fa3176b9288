//! HTTP adapters - REST API implementations.
//!
//! Each area has its own module with handlers, DTOs and a router. The
//! [`api_router`] function mounts them all under `/api` behind the bearer
//! auth middleware.

pub mod bonus;
pub mod departments;
pub mod diary;
pub mod employees;
pub mod error;
pub mod extract;
pub mod kpi;
pub mod middleware;
pub mod reports;
pub mod reviews;
pub mod router;
pub mod templates;

pub use error::ErrorResponse;
pub use router::{api_router, RouterSettings};

use std::sync::Arc;

use crate::adapters::memory::InMemoryStore;
use crate::ports::{
    BonusParametersStore, DashboardSettingsStore, EventPublisher, KpiAssessmentRepository,
    KpiModelRepository, ObservationRepository, OrgDirectory, ReviewFeedbackGenerator,
    ReviewRepository, SessionValidator, TemplateRepository,
};

/// Every port the HTTP surface depends on.
#[derive(Clone)]
pub struct ApiPorts {
    pub reviews: Arc<dyn ReviewRepository>,
    pub templates: Arc<dyn TemplateRepository>,
    pub observations: Arc<dyn ObservationRepository>,
    pub kpi_models: Arc<dyn KpiModelRepository>,
    pub kpi_assessments: Arc<dyn KpiAssessmentRepository>,
    pub bonus: Arc<dyn BonusParametersStore>,
    pub dashboard: Arc<dyn DashboardSettingsStore>,
    pub directory: Arc<dyn OrgDirectory>,
    pub event_publisher: Arc<dyn EventPublisher>,
    pub feedback_generator: Arc<dyn ReviewFeedbackGenerator>,
    pub session_validator: Arc<dyn SessionValidator>,
}

impl ApiPorts {
    /// Wires every persistence port to one in-memory store.
    pub fn in_memory(
        store: Arc<InMemoryStore>,
        event_publisher: Arc<dyn EventPublisher>,
        feedback_generator: Arc<dyn ReviewFeedbackGenerator>,
        session_validator: Arc<dyn SessionValidator>,
    ) -> Self {
        Self {
            reviews: store.clone(),
            templates: store.clone(),
            observations: store.clone(),
            kpi_models: store.clone(),
            kpi_assessments: store.clone(),
            bonus: store.clone(),
            dashboard: store.clone(),
            directory: store,
            event_publisher,
            feedback_generator,
            session_validator,
        }
    }
}
