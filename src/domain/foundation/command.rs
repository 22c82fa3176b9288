//! Command infrastructure for handlers.
//!
//! Every command handler receives a `CommandMetadata` carrying the
//! request-scoped caller (user and role) plus tracing context. Nothing about
//! the caller is read from ambient state.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Actor, Capabilities, Role, UserId};

/// Metadata context for command handlers.
///
/// ```ignore
/// let metadata = CommandMetadata::new(Actor::new(user_id, Role::Manager))
///     .with_correlation_id(request_id);
/// handler.handle(cmd, metadata).await?;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandMetadata {
    /// Who is executing this command.
    pub actor: Actor,

    #[serde(skip_serializing_if = "Option::is_none")]
    correlation_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    trace_id: Option<String>,

    /// Source of this command (e.g. "api", "test").
    #[serde(skip_serializing_if = "Option::is_none")]
    source: Option<String>,
}

impl CommandMetadata {
    pub fn new(actor: Actor) -> Self {
        Self {
            actor,
            correlation_id: None,
            trace_id: None,
            source: None,
        }
    }

    /// Builder: Add correlation ID for request tracing.
    pub fn with_correlation_id(mut self, id: impl Into<String>) -> Self {
        self.correlation_id = Some(id.into());
        self
    }

    /// Builder: Add trace ID for distributed tracing.
    pub fn with_trace_id(mut self, id: impl Into<String>) -> Self {
        self.trace_id = Some(id.into());
        self
    }

    /// Builder: Add source identifier.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn user_id(&self) -> &UserId {
        &self.actor.user_id
    }

    pub fn role(&self) -> Role {
        self.actor.role
    }

    pub fn capabilities(&self) -> Capabilities {
        self.actor.capabilities()
    }

    /// Returns the correlation ID, generating one if not set.
    pub fn correlation_id(&self) -> String {
        self.correlation_id
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().to_string())
    }

    pub fn trace_id(&self) -> Option<&str> {
        self.trace_id.as_deref()
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }
}

#[cfg(test)]
impl CommandMetadata {
    /// Metadata for an administrator named `admin-1`.
    pub fn test_admin() -> Self {
        Self::test_as("admin-1", Role::Administrator)
    }

    /// Metadata for an arbitrary user and role.
    pub fn test_as(user_id: &str, role: Role) -> Self {
        Self::new(Actor::new(UserId::new(user_id).unwrap(), role))
            .with_correlation_id("test-correlation-id")
            .with_source("test")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exposes_actor_identity_and_capabilities() {
        let metadata = CommandMetadata::test_as("manager-1", Role::Manager);
        assert_eq!(metadata.user_id().as_str(), "manager-1");
        assert_eq!(metadata.role(), Role::Manager);
        assert!(metadata.capabilities().manage_team_reviews);
        assert!(!metadata.capabilities().approve_reviews);
    }

    #[test]
    fn correlation_id_returns_set_value() {
        let metadata = CommandMetadata::test_admin().with_correlation_id("req-42");
        assert_eq!(metadata.correlation_id(), "req-42");
    }

    #[test]
    fn correlation_id_generates_if_missing() {
        let metadata = CommandMetadata::new(Actor::new(
            UserId::new("user").unwrap(),
            Role::Collaborator,
        ));
        assert!(!metadata.correlation_id().is_empty());
    }

    #[test]
    fn serialization_skips_none_fields() {
        let metadata = CommandMetadata::new(Actor::new(
            UserId::new("user").unwrap(),
            Role::Manager,
        ));
        let json = serde_json::to_string(&metadata).unwrap();
        assert!(json.contains("\"role\":\"manager\""));
        assert!(!json.contains("correlation_id"));
    }
}
