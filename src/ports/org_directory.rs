//! Org directory port.
//!
//! Credentials are owned by the identity provider. The directory records
//! who exists under the provider's user id, with their role and department,
//! and the departments themselves.

use async_trait::async_trait;

use crate::domain::foundation::{DepartmentId, DomainError, UserId};
use crate::domain::org::{Department, Employee, OrgChart};

#[async_trait]
pub trait OrgDirectory: Send + Sync {
    async fn list_employees(&self) -> Result<Vec<Employee>, DomainError>;

    async fn find_employee(&self, id: &UserId) -> Result<Option<Employee>, DomainError>;

    /// Inserts or replaces an employee by id.
    async fn save_employee(&self, employee: &Employee) -> Result<(), DomainError>;

    /// # Errors
    ///
    /// - `EmployeeNotFound` if the employee doesn't exist
    async fn delete_employee(&self, id: &UserId) -> Result<(), DomainError>;

    async fn list_departments(&self) -> Result<Vec<Department>, DomainError>;

    async fn find_department(&self, id: &DepartmentId) -> Result<Option<Department>, DomainError>;

    /// Inserts or replaces a department.
    async fn save_department(&self, department: &Department) -> Result<(), DomainError>;

    /// # Errors
    ///
    /// - `DepartmentNotFound` if the department doesn't exist
    async fn delete_department(&self, id: &DepartmentId) -> Result<(), DomainError>;

    /// Snapshot of employees and departments together.
    async fn org_chart(&self) -> Result<OrgChart, DomainError> {
        let employees = self.list_employees().await?;
        let departments = self.list_departments().await?;
        Ok(OrgChart::new(employees, departments))
    }
}
