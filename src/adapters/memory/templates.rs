use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ErrorCode, TemplateId, UserId};
use crate::domain::review::{ReviewTemplate, TemplateAssignment};
use crate::ports::TemplateRepository;

use super::InMemoryStore;

#[async_trait]
impl TemplateRepository for InMemoryStore {
    async fn save(&self, template: &ReviewTemplate) -> Result<(), DomainError> {
        let mut state = self.write()?;
        match state.templates.iter_mut().find(|t| t.id() == template.id()) {
            Some(existing) => *existing = template.clone(),
            None => state.templates.push(template.clone()),
        }
        Ok(())
    }

    async fn find_by_id(&self, id: &TemplateId) -> Result<Option<ReviewTemplate>, DomainError> {
        Ok(self
            .read()?
            .templates
            .iter()
            .find(|t| &t.id() == id)
            .cloned())
    }

    async fn list(&self) -> Result<Vec<ReviewTemplate>, DomainError> {
        Ok(self.read()?.templates.clone())
    }

    async fn delete(&self, id: &TemplateId) -> Result<(), DomainError> {
        let mut state = self.write()?;
        let before = state.templates.len();
        state.templates.retain(|t| &t.id() != id);
        if state.templates.len() == before {
            return Err(DomainError::new(
                ErrorCode::TemplateNotFound,
                format!("Template not found: {}", id),
            ));
        }
        state.assignments.remove(id);
        Ok(())
    }

    async fn assign(&self, assignment: &TemplateAssignment) -> Result<(), DomainError> {
        self.write()?
            .assignments
            .insert(assignment.template_id, assignment.manager_ids.clone());
        Ok(())
    }

    async fn assignment_for(&self, template_id: &TemplateId) -> Result<TemplateAssignment, DomainError> {
        let managers = self
            .read()?
            .assignments
            .get(template_id)
            .cloned()
            .unwrap_or_default();
        Ok(TemplateAssignment::new(*template_id, managers))
    }

    async fn assigned_to(&self, manager_id: &UserId) -> Result<Vec<ReviewTemplate>, DomainError> {
        let state = self.read()?;
        Ok(state
            .templates
            .iter()
            .filter(|t| {
                state
                    .assignments
                    .get(&t.id())
                    .map_or(false, |managers| managers.contains(manager_id))
            })
            .cloned()
            .collect())
    }
}
