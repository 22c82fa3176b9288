use async_trait::async_trait;

use crate::domain::foundation::{DepartmentId, DomainError, ErrorCode, UserId};
use crate::domain::org::{Department, Employee};
use crate::ports::OrgDirectory;

use super::InMemoryStore;

#[async_trait]
impl OrgDirectory for InMemoryStore {
    async fn list_employees(&self) -> Result<Vec<Employee>, DomainError> {
        Ok(self.read()?.employees.clone())
    }

    async fn find_employee(&self, id: &UserId) -> Result<Option<Employee>, DomainError> {
        Ok(self.read()?.employees.iter().find(|e| &e.id == id).cloned())
    }

    async fn save_employee(&self, employee: &Employee) -> Result<(), DomainError> {
        let mut state = self.write()?;
        match state.employees.iter_mut().find(|e| e.id == employee.id) {
            Some(existing) => *existing = employee.clone(),
            None => state.employees.push(employee.clone()),
        }
        Ok(())
    }

    async fn delete_employee(&self, id: &UserId) -> Result<(), DomainError> {
        let mut state = self.write()?;
        let before = state.employees.len();
        state.employees.retain(|e| &e.id != id);
        if state.employees.len() == before {
            return Err(DomainError::new(
                ErrorCode::EmployeeNotFound,
                format!("Employee not found: {}", id),
            ));
        }
        Ok(())
    }

    async fn list_departments(&self) -> Result<Vec<Department>, DomainError> {
        Ok(self.read()?.departments.clone())
    }

    async fn find_department(&self, id: &DepartmentId) -> Result<Option<Department>, DomainError> {
        Ok(self
            .read()?
            .departments
            .iter()
            .find(|d| &d.id() == id)
            .cloned())
    }

    async fn save_department(&self, department: &Department) -> Result<(), DomainError> {
        let mut state = self.write()?;
        match state.departments.iter_mut().find(|d| d.id() == department.id()) {
            Some(existing) => *existing = department.clone(),
            None => state.departments.push(department.clone()),
        }
        Ok(())
    }

    async fn delete_department(&self, id: &DepartmentId) -> Result<(), DomainError> {
        let mut state = self.write()?;
        let before = state.departments.len();
        state.departments.retain(|d| &d.id() != id);
        if state.departments.len() == before {
            return Err(DomainError::new(
                ErrorCode::DepartmentNotFound,
                format!("Department not found: {}", id),
            ));
        }
        for employee in state.employees.iter_mut() {
            if employee.department_id.as_ref() == Some(id) {
                employee.department_id = None;
            }
        }
        Ok(())
    }
}
