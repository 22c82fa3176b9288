//! Request and response bodies for template endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{TemplateId, Timestamp, UserId};
use crate::domain::review::{ReviewTemplate, TemplateAssignment};

#[derive(Debug, Clone, Deserialize)]
pub struct SaveTemplateRequest {
    /// Present when updating an existing template.
    #[serde(default)]
    pub id: Option<TemplateId>,
    pub name: String,
    pub items: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AssignTemplateRequest {
    pub manager_ids: Vec<UserId>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TemplateResponse {
    pub id: TemplateId,
    pub name: String,
    pub items: Vec<String>,
    pub created_at: Timestamp,
}

impl From<&ReviewTemplate> for TemplateResponse {
    fn from(template: &ReviewTemplate) -> Self {
        Self {
            id: template.id(),
            name: template.name().to_string(),
            items: template.items().iter().map(|i| i.text.clone()).collect(),
            created_at: template.created_at(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AssignmentResponse {
    pub template_id: TemplateId,
    pub manager_ids: Vec<UserId>,
}

impl From<TemplateAssignment> for AssignmentResponse {
    fn from(assignment: TemplateAssignment) -> Self {
        Self {
            template_id: assignment.template_id,
            manager_ids: assignment.manager_ids,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_request_without_id_creates() {
        let json = r#"{"name": "Trimestral", "items": ["Comunicação", "Entrega"]}"#;
        let req: SaveTemplateRequest = serde_json::from_str(json).unwrap();
        assert!(req.id.is_none());
        assert_eq!(req.items.len(), 2);
    }

    #[test]
    fn template_response_flattens_items() {
        let template =
            ReviewTemplate::new("Trimestral", vec!["Comunicação".into(), "Entrega".into()]).unwrap();
        let json = serde_json::to_value(TemplateResponse::from(&template)).unwrap();
        assert_eq!(json["items"][1], "Entrega");
    }
}
