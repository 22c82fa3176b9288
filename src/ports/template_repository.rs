//! Template repository port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, TemplateId, UserId};
use crate::domain::review::{ReviewTemplate, TemplateAssignment};

/// Persists review templates and which managers may use them.
#[async_trait]
pub trait TemplateRepository: Send + Sync {
    /// Inserts or replaces a template.
    async fn save(&self, template: &ReviewTemplate) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &TemplateId) -> Result<Option<ReviewTemplate>, DomainError>;

    /// All templates, oldest first.
    async fn list(&self) -> Result<Vec<ReviewTemplate>, DomainError>;

    /// Deletes a template and its assignment.
    ///
    /// # Errors
    ///
    /// - `TemplateNotFound` if the template doesn't exist
    async fn delete(&self, id: &TemplateId) -> Result<(), DomainError>;

    /// Replaces the set of managers assigned to a template.
    async fn assign(&self, assignment: &TemplateAssignment) -> Result<(), DomainError>;

    /// Managers assigned to `template_id`; empty when unassigned.
    async fn assignment_for(&self, template_id: &TemplateId) -> Result<TemplateAssignment, DomainError>;

    /// Templates assigned to `manager_id`, oldest first.
    async fn assigned_to(&self, manager_id: &UserId) -> Result<Vec<ReviewTemplate>, DomainError>;
}
