//! Foundation module - Shared domain primitives.
//!
//! Identifiers, value objects, roles, errors and event plumbing that form the
//! vocabulary of the Humance domain.

mod auth;
mod command;
mod errors;
mod events;
mod ids;
mod period;
mod role;
mod state_machine;
mod timestamp;

pub use auth::{AuthError, AuthenticatedUser};
pub use command::CommandMetadata;
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use events::{domain_event, DomainEvent, EventEnvelope, EventId, EventMetadata};
pub use ids::{
    DepartmentId, DiaryEntryId, KpiAssessmentId, KpiModelId, ObservationId, ReviewId,
    TemplateId, UserId,
};
pub use period::Period;
pub use role::{Actor, BonusAudience, Capabilities, Role};
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
