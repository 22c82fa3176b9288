//! Review templates: the list of items a manager scores.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{TemplateId, Timestamp, UserId, ValidationError};

/// Minimum length of a template name.
pub const TEMPLATE_NAME_MIN_CHARS: usize = 3;

/// Minimum length of an item's text.
pub const ITEM_TEXT_MIN_CHARS: usize = 3;

/// One criterion in a template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationItem {
    pub text: String,
}

/// A named, ordered list of evaluation items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewTemplate {
    id: TemplateId,
    name: String,
    items: Vec<EvaluationItem>,
    created_at: Timestamp,
}

impl ReviewTemplate {
    /// Creates a template.
    ///
    /// # Errors
    ///
    /// - name shorter than 3 characters
    /// - no items, or an item shorter than 3 characters
    pub fn new(name: &str, items: Vec<String>) -> Result<Self, ValidationError> {
        let (name, items) = Self::validate(name, items)?;
        Ok(Self {
            id: TemplateId::new(),
            name,
            items,
            created_at: Timestamp::now(),
        })
    }

    pub fn reconstitute(
        id: TemplateId,
        name: String,
        items: Vec<EvaluationItem>,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            name,
            items,
            created_at,
        }
    }

    pub fn id(&self) -> TemplateId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn items(&self) -> &[EvaluationItem] {
        &self.items
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    /// Replaces name and items. Existing reviews keep their frozen averages.
    pub fn update(&mut self, name: &str, items: Vec<String>) -> Result<(), ValidationError> {
        let (name, items) = Self::validate(name, items)?;
        self.name = name;
        self.items = items;
        Ok(())
    }

    fn validate(
        name: &str,
        items: Vec<String>,
    ) -> Result<(String, Vec<EvaluationItem>), ValidationError> {
        let name = ValidationError::require_min_chars("name", name, TEMPLATE_NAME_MIN_CHARS)?;
        if items.is_empty() {
            return Err(ValidationError::empty_field("items"));
        }
        let items = items
            .iter()
            .map(|text| {
                ValidationError::require_min_chars("items", text, ITEM_TEXT_MIN_CHARS)
                    .map(|text| EvaluationItem { text })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok((name, items))
    }
}

/// The managers allowed to use a template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateAssignment {
    pub template_id: TemplateId,
    pub manager_ids: Vec<UserId>,
}

impl TemplateAssignment {
    /// De-duplicates managers while keeping their order.
    pub fn new(template_id: TemplateId, manager_ids: Vec<UserId>) -> Self {
        let mut unique: Vec<UserId> = Vec::with_capacity(manager_ids.len());
        for id in manager_ids {
            if !unique.contains(&id) {
                unique.push(id);
            }
        }
        Self {
            template_id,
            manager_ids: unique,
        }
    }
}
