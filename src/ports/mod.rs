//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Persistence Ports
//!
//! - `ReviewRepository` - Performance reviews
//! - `TemplateRepository` - Review templates and their manager assignments
//! - `ObservationRepository` - Weekly observations and the diary
//! - `KpiModelRepository` / `KpiAssessmentRepository` - KPI models and snapshots
//! - `BonusParametersStore` - The two bonus tier tables
//! - `DashboardSettingsStore` - The employee of the month card
//! - `OrgDirectory` - Employees and departments
//!
//! ## Collaborator Ports
//!
//! - `EventPublisher` - Publishing domain events
//! - `SessionValidator` - Bearer token validation
//! - `ReviewFeedbackGenerator` - Drafting employee feedback from scores

mod bonus_parameters_store;
mod dashboard_settings_store;
mod event_publisher;
mod feedback_generator;
mod kpi_repository;
mod observation_repository;
mod org_directory;
mod review_repository;
mod session_validator;
mod template_repository;

pub use bonus_parameters_store::BonusParametersStore;
pub use dashboard_settings_store::DashboardSettingsStore;
pub use event_publisher::EventPublisher;
pub use feedback_generator::{FeedbackItem, FeedbackRequest, ReviewFeedbackGenerator};
pub use kpi_repository::{KpiAssessmentRepository, KpiModelRepository, KpiReviewWrites};
pub use observation_repository::{DiaryFilter, ObservationRepository};
pub use org_directory::OrgDirectory;
pub use review_repository::{ReviewFilter, ReviewRepository};
pub use session_validator::SessionValidator;
pub use template_repository::TemplateRepository;
