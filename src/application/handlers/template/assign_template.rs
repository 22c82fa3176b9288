//! AssignTemplateHandler - Replaces the managers allowed to use a template.

use std::sync::Arc;

use crate::domain::foundation::{CommandMetadata, TemplateId, UserId};
use crate::domain::review::{ReviewError, TemplateAssignment};
use crate::ports::{OrgDirectory, TemplateRepository};

#[derive(Debug, Clone)]
pub struct AssignTemplateCommand {
    pub template_id: TemplateId,
    pub manager_ids: Vec<UserId>,
}

pub struct AssignTemplateHandler {
    templates: Arc<dyn TemplateRepository>,
    directory: Arc<dyn OrgDirectory>,
}

impl AssignTemplateHandler {
    pub fn new(templates: Arc<dyn TemplateRepository>, directory: Arc<dyn OrgDirectory>) -> Self {
        Self {
            templates,
            directory,
        }
    }

    pub async fn handle(
        &self,
        cmd: AssignTemplateCommand,
        metadata: CommandMetadata,
    ) -> Result<TemplateAssignment, ReviewError> {
        if !metadata.capabilities().manage_configuration {
            return Err(ReviewError::forbidden());
        }
        if self.templates.find_by_id(&cmd.template_id).await?.is_none() {
            return Err(ReviewError::TemplateNotFound(cmd.template_id));
        }
        for manager_id in &cmd.manager_ids {
            if self.directory.find_employee(manager_id).await?.is_none() {
                return Err(ReviewError::EmployeeNotFound(manager_id.clone()));
            }
        }

        let assignment = TemplateAssignment::new(cmd.template_id, cmd.manager_ids);
        self.templates.assign(&assignment).await?;
        Ok(assignment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::*;

    fn handler(env: &TestEnv) -> AssignTemplateHandler {
        AssignTemplateHandler::new(env.store.clone(), env.store.clone())
    }

    #[tokio::test]
    async fn assignment_replaces_previous_managers() {
        let env = TestEnv::new().await;
        let assignment = handler(&env)
            .handle(
                AssignTemplateCommand {
                    template_id: env.template.id(),
                    manager_ids: vec![uid(OTHER_MANAGER), uid(OTHER_MANAGER)],
                },
                admin(),
            )
            .await
            .unwrap();

        assert_eq!(assignment.manager_ids, vec![uid(OTHER_MANAGER)]);
        assert!(env.store.assigned_to(&uid(MANAGER)).await.unwrap().is_empty());
        assert_eq!(env.store.assigned_to(&uid(OTHER_MANAGER)).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn rejects_unknown_managers() {
        let env = TestEnv::new().await;
        let err = handler(&env)
            .handle(
                AssignTemplateCommand {
                    template_id: env.template.id(),
                    manager_ids: vec![uid("ghost")],
                },
                admin(),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ReviewError::EmployeeNotFound(_)));
    }
}
