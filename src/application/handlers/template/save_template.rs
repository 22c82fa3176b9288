//! SaveTemplateHandler - Creates or updates a review template.

use std::sync::Arc;

use crate::domain::foundation::{CommandMetadata, TemplateId};
use crate::domain::review::{ReviewError, ReviewTemplate};
use crate::ports::TemplateRepository;

/// Command to create (`template_id: None`) or update a template.
#[derive(Debug, Clone)]
pub struct SaveTemplateCommand {
    pub template_id: Option<TemplateId>,
    pub name: String,
    pub items: Vec<String>,
}

pub struct SaveTemplateHandler {
    templates: Arc<dyn TemplateRepository>,
}

impl SaveTemplateHandler {
    pub fn new(templates: Arc<dyn TemplateRepository>) -> Self {
        Self { templates }
    }

    pub async fn handle(
        &self,
        cmd: SaveTemplateCommand,
        metadata: CommandMetadata,
    ) -> Result<ReviewTemplate, ReviewError> {
        if !metadata.capabilities().manage_configuration {
            return Err(ReviewError::forbidden());
        }

        let template = match cmd.template_id {
            Some(id) => {
                let mut template = self
                    .templates
                    .find_by_id(&id)
                    .await?
                    .ok_or(ReviewError::TemplateNotFound(id))?;
                template.update(&cmd.name, cmd.items)?;
                template
            }
            None => ReviewTemplate::new(&cmd.name, cmd.items)?,
        };

        self.templates.save(&template).await?;
        tracing::info!(template_id = %template.id(), items = template.item_count(), "template saved");
        Ok(template)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::*;

    fn command(name: &str, items: &[&str]) -> SaveTemplateCommand {
        SaveTemplateCommand {
            template_id: None,
            name: name.to_string(),
            items: items.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[tokio::test]
    async fn creates_then_updates_template() {
        let env = TestEnv::new().await;
        let handler = SaveTemplateHandler::new(env.store.clone());

        let created = handler
            .handle(command("Semestral", &["Liderança", "Comunicação"]), admin())
            .await
            .unwrap();
        assert_eq!(created.item_count(), 2);

        let mut update = command("Semestral v2", &["Liderança"]);
        update.template_id = Some(created.id());
        let updated = handler.handle(update, admin()).await.unwrap();

        assert_eq!(updated.id(), created.id());
        let stored = env.store.find_by_id(&created.id()).await.unwrap().unwrap();
        assert_eq!(stored.name(), "Semestral v2");
        assert_eq!(stored.item_count(), 1);
    }

    #[tokio::test]
    async fn rejects_short_names_and_empty_item_lists() {
        let env = TestEnv::new().await;
        let handler = SaveTemplateHandler::new(env.store.clone());

        assert!(matches!(
            handler.handle(command("AB", &["Liderança"]), admin()).await,
            Err(ReviewError::ValidationFailed { .. })
        ));
        assert!(matches!(
            handler.handle(command("Semestral", &[]), admin()).await,
            Err(ReviewError::ValidationFailed { .. })
        ));
        assert!(matches!(
            handler.handle(command("Semestral", &["ok"]), admin()).await,
            Err(ReviewError::ValidationFailed { .. })
        ));
    }

    #[tokio::test]
    async fn only_administrators_manage_templates() {
        let env = TestEnv::new().await;
        let err = SaveTemplateHandler::new(env.store.clone())
            .handle(command("Semestral", &["Liderança"]), manager())
            .await
            .unwrap_err();
        assert_eq!(err, ReviewError::Forbidden);
    }
}
