//! Template queries.

use std::sync::Arc;

use crate::domain::foundation::Actor;
use crate::domain::review::{ReviewError, ReviewTemplate};
use crate::ports::TemplateRepository;

/// Query for every template (configuration screen).
#[derive(Debug, Clone)]
pub struct ListTemplatesQuery {
    pub actor: Actor,
}

/// Query for the templates assigned to the caller.
#[derive(Debug, Clone)]
pub struct ListAssignedTemplatesQuery {
    pub actor: Actor,
}

pub struct ListTemplatesHandler {
    templates: Arc<dyn TemplateRepository>,
}

impl ListTemplatesHandler {
    pub fn new(templates: Arc<dyn TemplateRepository>) -> Self {
        Self { templates }
    }

    pub async fn handle(&self, query: ListTemplatesQuery) -> Result<Vec<ReviewTemplate>, ReviewError> {
        if !query.actor.capabilities().manage_configuration {
            return Err(ReviewError::forbidden());
        }
        Ok(self.templates.list().await?)
    }

    /// Templates the caller may open reviews with. Administrators may use any template.
    pub async fn handle_assigned(
        &self,
        query: ListAssignedTemplatesQuery,
    ) -> Result<Vec<ReviewTemplate>, ReviewError> {
        if query.actor.capabilities().view_all_reviews {
            return Ok(self.templates.list().await?);
        }
        Ok(self.templates.assigned_to(&query.actor.user_id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::*;
    use crate::domain::foundation::Role;

    fn actor(id: &str, role: Role) -> Actor {
        Actor::new(uid(id), role)
    }

    #[tokio::test]
    async fn assigned_templates_depend_on_caller() {
        let env = TestEnv::new().await;
        let handler = ListTemplatesHandler::new(env.store.clone());

        let mine = handler
            .handle_assigned(ListAssignedTemplatesQuery {
                actor: actor(MANAGER, Role::Manager),
            })
            .await
            .unwrap();
        assert_eq!(mine.len(), 1);

        let none = handler
            .handle_assigned(ListAssignedTemplatesQuery {
                actor: actor(OTHER_MANAGER, Role::Manager),
            })
            .await
            .unwrap();
        assert!(none.is_empty());

        let all = handler
            .handle_assigned(ListAssignedTemplatesQuery {
                actor: actor(ADMIN, Role::Administrator),
            })
            .await
            .unwrap();
        assert_eq!(all.len(), 1);
    }

    #[tokio::test]
    async fn full_list_is_for_administrators() {
        let env = TestEnv::new().await;
        let handler = ListTemplatesHandler::new(env.store.clone());
        assert_eq!(
            handler
                .handle(ListTemplatesQuery {
                    actor: actor(ADMIN, Role::Administrator)
                })
                .await
                .unwrap()
                .len(),
            1
        );
        assert_eq!(
            handler
                .handle(ListTemplatesQuery {
                    actor: actor(MANAGER, Role::Manager)
                })
                .await
                .unwrap_err(),
            ReviewError::Forbidden
        );
    }
}
