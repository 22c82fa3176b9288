//! Employee maintenance and listing.
//!
//! Records are keyed by the identity provider's user id. Passwords and
//! account creation stay with the provider.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::domain::foundation::{
    Actor, CommandMetadata, DepartmentId, DomainError, ErrorCode, Role, UserId,
};
use crate::domain::org::{Employee, OrgChart};
use crate::ports::OrgDirectory;

#[derive(Debug, Clone)]
pub struct ListEmployeesQuery {
    pub actor: Actor,
}

/// Creates or replaces the directory record of `employee_id`.
#[derive(Debug, Clone)]
pub struct SaveEmployeeCommand {
    pub employee_id: UserId,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub department_id: Option<DepartmentId>,
    pub birth_date: Option<NaiveDate>,
}

#[derive(Debug, Clone)]
pub struct DeleteEmployeeCommand {
    pub employee_id: UserId,
}

pub struct EmployeeHandler {
    directory: Arc<dyn OrgDirectory>,
}

impl EmployeeHandler {
    pub fn new(directory: Arc<dyn OrgDirectory>) -> Self {
        Self { directory }
    }

    /// Everyone for administrators, the team for managers. Sorted by name.
    pub async fn list(&self, query: ListEmployeesQuery) -> Result<Vec<Employee>, DomainError> {
        let caps = query.actor.capabilities();
        if !caps.manage_team_reviews {
            return Err(forbidden());
        }
        let chart = self.directory.org_chart().await?;
        let mut employees: Vec<Employee> = if caps.view_all_reviews {
            chart.employees().to_vec()
        } else {
            chart.team_of(&query.actor.user_id).into_iter().cloned().collect()
        };
        employees.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
        Ok(employees)
    }

    pub async fn save(
        &self,
        cmd: SaveEmployeeCommand,
        metadata: CommandMetadata,
    ) -> Result<Employee, DomainError> {
        if !metadata.capabilities().manage_configuration {
            return Err(forbidden());
        }

        let mut employee = Employee::new(
            cmd.employee_id,
            cmd.name.trim(),
            cmd.email.trim(),
            cmd.role,
            cmd.department_id,
        );
        employee.birth_date = cmd.birth_date;
        employee.validate()?;

        let chart = self.directory.org_chart().await?;
        if let Some(department_id) = &employee.department_id {
            if chart.department(department_id).is_none() {
                return Err(DomainError::new(
                    ErrorCode::DepartmentNotFound,
                    format!("Department not found: {}", department_id),
                ));
            }
        }
        if !employee.is_manager() {
            if let Some(led) = leads_department(&chart, &employee.id) {
                return Err(DomainError::validation(
                    "role",
                    format!("Leader of {} must stay a manager", led),
                ));
            }
        }

        self.directory.save_employee(&employee).await?;
        tracing::info!(
            employee_id = %employee.id,
            role = employee.role.as_str(),
            department_id = ?employee.department_id,
            "employee saved"
        );
        Ok(employee)
    }

    /// Reviews keep the name they were opened with.
    pub async fn delete(
        &self,
        cmd: DeleteEmployeeCommand,
        metadata: CommandMetadata,
    ) -> Result<(), DomainError> {
        if !metadata.capabilities().manage_configuration {
            return Err(forbidden());
        }
        if metadata.user_id() == &cmd.employee_id {
            return Err(DomainError::validation(
                "employee_id",
                "You cannot remove your own account",
            ));
        }

        let chart = self.directory.org_chart().await?;
        if chart.employee(&cmd.employee_id).is_none() {
            return Err(DomainError::new(
                ErrorCode::EmployeeNotFound,
                format!("Employee not found: {}", cmd.employee_id),
            ));
        }
        if let Some(led) = leads_department(&chart, &cmd.employee_id) {
            return Err(DomainError::validation(
                "employee_id",
                format!("Assign a new leader to {} first", led),
            ));
        }

        self.directory.delete_employee(&cmd.employee_id).await?;
        tracing::info!(employee_id = %cmd.employee_id, "employee deleted");
        Ok(())
    }
}

fn leads_department<'a>(chart: &'a OrgChart, id: &UserId) -> Option<&'a str> {
    chart
        .departments()
        .iter()
        .find(|d| d.is_led_by(id))
        .map(|d| d.name())
}

fn forbidden() -> DomainError {
    DomainError::new(ErrorCode::Forbidden, "Permission denied")
}
