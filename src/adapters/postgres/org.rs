//! PostgreSQL implementation of OrgDirectory.

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::postgres::PgRow;
use sqlx::PgPool;

use crate::domain::foundation::{DepartmentId, DomainError, ErrorCode, Role, UserId};
use crate::domain::org::{Department, Employee};
use crate::ports::OrgDirectory;

use super::{column, db_error, user_id_column};

/// PostgreSQL implementation of OrgDirectory.
#[derive(Clone)]
pub struct PostgresOrgDirectory {
    pool: PgPool,
}

impl PostgresOrgDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OrgDirectory for PostgresOrgDirectory {
    async fn list_employees(&self) -> Result<Vec<Employee>, DomainError> {
        let rows = sqlx::query(
            "SELECT id, name, email, role, birth_date, department_id FROM employees ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("list employees"))?;

        rows.into_iter().map(row_to_employee).collect()
    }

    async fn find_employee(&self, id: &UserId) -> Result<Option<Employee>, DomainError> {
        let row = sqlx::query(
            "SELECT id, name, email, role, birth_date, department_id FROM employees WHERE id = $1",
        )
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("fetch employee"))?;

        row.map(row_to_employee).transpose()
    }

    async fn save_employee(&self, employee: &Employee) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO employees (id, name, email, role, birth_date, department_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (id) DO UPDATE SET
                name = EXCLUDED.name,
                email = EXCLUDED.email,
                role = EXCLUDED.role,
                birth_date = EXCLUDED.birth_date,
                department_id = EXCLUDED.department_id
            "#,
        )
        .bind(employee.id.as_str())
        .bind(&employee.name)
        .bind(&employee.email)
        .bind(employee.role.as_str())
        .bind(employee.birth_date)
        .bind(employee.department_id.map(|d| *d.as_uuid()))
        .execute(&self.pool)
        .await
        .map_err(db_error("save employee"))?;

        Ok(())
    }

    async fn delete_employee(&self, id: &UserId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM employees WHERE id = $1")
            .bind(id.as_str())
            .execute(&self.pool)
            .await
            .map_err(db_error("delete employee"))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::EmployeeNotFound,
                format!("Employee not found: {}", id),
            ));
        }
        Ok(())
    }

    async fn list_departments(&self) -> Result<Vec<Department>, DomainError> {
        let rows = sqlx::query("SELECT id, name, leader_id FROM departments ORDER BY name")
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("list departments"))?;

        rows.into_iter().map(row_to_department).collect()
    }

    async fn find_department(&self, id: &DepartmentId) -> Result<Option<Department>, DomainError> {
        let row = sqlx::query("SELECT id, name, leader_id FROM departments WHERE id = $1")
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("fetch department"))?;

        row.map(row_to_department).transpose()
    }

    async fn save_department(&self, department: &Department) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO departments (id, name, leader_id)
            VALUES ($1, $2, $3)
            ON CONFLICT (id) DO UPDATE SET name = EXCLUDED.name, leader_id = EXCLUDED.leader_id
            "#,
        )
        .bind(department.id().as_uuid())
        .bind(department.name())
        .bind(department.leader_id().as_str())
        .execute(&self.pool)
        .await
        .map_err(db_error("save department"))?;

        Ok(())
    }

    async fn delete_department(&self, id: &DepartmentId) -> Result<(), DomainError> {
        let mut tx = self.pool.begin().await.map_err(db_error("start transaction"))?;

        sqlx::query("UPDATE employees SET department_id = NULL WHERE department_id = $1")
            .bind(id.as_uuid())
            .execute(&mut *tx)
            .await
            .map_err(db_error("detach department members"))?;

        let result = sqlx::query("DELETE FROM departments WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&mut *tx)
            .await
            .map_err(db_error("delete department"))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::DepartmentNotFound,
                format!("Department not found: {}", id),
            ));
        }

        tx.commit().await.map_err(db_error("commit transaction"))?;
        Ok(())
    }
}

fn row_to_employee(row: PgRow) -> Result<Employee, DomainError> {
    let role_str: String = column(&row, "role")?;
    let role = Role::parse(&role_str).ok_or_else(|| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid role: {}", role_str),
        )
    })?;
    let department_id: Option<uuid::Uuid> = column(&row, "department_id")?;
    let birth_date: Option<NaiveDate> = column(&row, "birth_date")?;

    let employee = Employee::new(
        user_id_column(&row, "id")?,
        column::<String>(&row, "name")?,
        column::<String>(&row, "email")?,
        role,
        department_id.map(DepartmentId::from_uuid),
    );
    Ok(match birth_date {
        Some(date) => employee.with_birth_date(date),
        None => employee,
    })
}

fn row_to_department(row: PgRow) -> Result<Department, DomainError> {
    let id: uuid::Uuid = column(&row, "id")?;
    Ok(Department::reconstitute(
        DepartmentId::from_uuid(id),
        column(&row, "name")?,
        user_id_column(&row, "leader_id")?,
    ))
}
