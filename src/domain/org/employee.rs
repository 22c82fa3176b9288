//! Users of the organisation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DepartmentId, Role, UserId, ValidationError};

/// A person in the org chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department_id: Option<DepartmentId>,
}

impl Employee {
    pub fn new(
        id: UserId,
        name: impl Into<String>,
        email: impl Into<String>,
        role: Role,
        department_id: Option<DepartmentId>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
            role,
            birth_date: None,
            department_id,
        }
    }

    pub fn with_birth_date(mut self, birth_date: NaiveDate) -> Self {
        self.birth_date = Some(birth_date);
        self
    }

    pub fn is_manager(&self) -> bool {
        self.role == Role::Manager
    }

    /// Requires a name and an address-shaped email.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::empty_field("name"));
        }
        let email = self.email.trim();
        match email.split_once('@') {
            Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
            _ => Err(ValidationError::invalid_format("email", "must be an email address")),
        }
    }
}
