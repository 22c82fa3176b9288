//! DeleteTemplateHandler - Removes a template and its assignment.
//!
//! Existing reviews keep the template name they were opened with.

use std::sync::Arc;

use crate::domain::foundation::{CommandMetadata, TemplateId};
use crate::domain::review::ReviewError;
use crate::ports::TemplateRepository;

#[derive(Debug, Clone)]
pub struct DeleteTemplateCommand {
    pub template_id: TemplateId,
}

pub struct DeleteTemplateHandler {
    templates: Arc<dyn TemplateRepository>,
}

impl DeleteTemplateHandler {
    pub fn new(templates: Arc<dyn TemplateRepository>) -> Self {
        Self { templates }
    }

    pub async fn handle(
        &self,
        cmd: DeleteTemplateCommand,
        metadata: CommandMetadata,
    ) -> Result<(), ReviewError> {
        if !metadata.capabilities().manage_configuration {
            return Err(ReviewError::forbidden());
        }
        if self.templates.find_by_id(&cmd.template_id).await?.is_none() {
            return Err(ReviewError::TemplateNotFound(cmd.template_id));
        }
        self.templates.delete(&cmd.template_id).await?;
        Ok(())
    }
}
