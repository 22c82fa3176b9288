//! Departments and their leaders.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DepartmentId, UserId, ValidationError};

/// A department led by one manager.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    id: DepartmentId,
    name: String,
    leader_id: UserId,
}

impl Department {
    /// Creates a department; the name must not be blank.
    pub fn new(name: impl Into<String>, leader_id: UserId) -> Result<Self, ValidationError> {
        Ok(Self {
            id: DepartmentId::new(),
            name: Self::validate_name(name.into())?,
            leader_id,
        })
    }

    pub fn reconstitute(id: DepartmentId, name: String, leader_id: UserId) -> Self {
        Self {
            id,
            name,
            leader_id,
        }
    }

    pub fn id(&self) -> DepartmentId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn leader_id(&self) -> &UserId {
        &self.leader_id
    }

    pub fn is_led_by(&self, user_id: &UserId) -> bool {
        &self.leader_id == user_id
    }

    /// Renames the department and/or hands it to a new leader.
    pub fn update(&mut self, name: impl Into<String>, leader_id: UserId) -> Result<(), ValidationError> {
        self.name = Self::validate_name(name.into())?;
        self.leader_id = leader_id;
        Ok(())
    }

    fn validate_name(name: String) -> Result<String, ValidationError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::empty_field("name"));
        }
        Ok(trimmed.to_string())
    }
}
