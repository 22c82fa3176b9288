//! PostgreSQL implementation of TemplateRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::PgPool;

use crate::domain::foundation::{DomainError, ErrorCode, TemplateId, Timestamp, UserId};
use crate::domain::review::{ReviewTemplate, TemplateAssignment};
use crate::ports::TemplateRepository;

use super::{column, db_error, json_column, to_json, user_id_column};

/// PostgreSQL implementation of TemplateRepository.
#[derive(Clone)]
pub struct PostgresTemplateRepository {
    pool: PgPool,
}

impl PostgresTemplateRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TemplateRepository for PostgresTemplateRepository {
    async fn save(&self, template: &ReviewTemplate) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO review_templates (id, name, items, created_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (id) DO UPDATE SET name = EXCLUDED.name, items = EXCLUDED.items
            "#,
        )
        .bind(template.id().as_uuid())
        .bind(template.name())
        .bind(to_json(&template.items())?)
        .bind(*template.created_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(db_error("save template"))?;

        Ok(())
    }

    async fn find_by_id(&self, id: &TemplateId) -> Result<Option<ReviewTemplate>, DomainError> {
        let row = sqlx::query("SELECT id, name, items, created_at FROM review_templates WHERE id = $1")
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("fetch template"))?;

        row.map(row_to_template).transpose()
    }

    async fn list(&self) -> Result<Vec<ReviewTemplate>, DomainError> {
        let rows = sqlx::query(
            "SELECT id, name, items, created_at FROM review_templates ORDER BY created_at",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("list templates"))?;

        rows.into_iter().map(row_to_template).collect()
    }

    async fn delete(&self, id: &TemplateId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM review_templates WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(db_error("delete template"))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::TemplateNotFound,
                format!("Template not found: {}", id),
            ));
        }
        Ok(())
    }

    async fn assign(&self, assignment: &TemplateAssignment) -> Result<(), DomainError> {
        let mut tx = self.pool.begin().await.map_err(db_error("start transaction"))?;

        sqlx::query("DELETE FROM template_assignments WHERE template_id = $1")
            .bind(assignment.template_id.as_uuid())
            .execute(&mut *tx)
            .await
            .map_err(db_error("clear template assignment"))?;

        for manager_id in &assignment.manager_ids {
            sqlx::query("INSERT INTO template_assignments (template_id, manager_id) VALUES ($1, $2)")
                .bind(assignment.template_id.as_uuid())
                .bind(manager_id.as_str())
                .execute(&mut *tx)
                .await
                .map_err(db_error("assign template"))?;
        }

        tx.commit().await.map_err(db_error("commit transaction"))?;
        Ok(())
    }

    async fn assignment_for(&self, template_id: &TemplateId) -> Result<TemplateAssignment, DomainError> {
        let rows = sqlx::query(
            "SELECT manager_id FROM template_assignments WHERE template_id = $1 ORDER BY manager_id",
        )
        .bind(template_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("fetch template assignment"))?;

        let managers = rows
            .iter()
            .map(|row| user_id_column(row, "manager_id"))
            .collect::<Result<Vec<UserId>, _>>()?;
        Ok(TemplateAssignment::new(*template_id, managers))
    }

    async fn assigned_to(&self, manager_id: &UserId) -> Result<Vec<ReviewTemplate>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT t.id, t.name, t.items, t.created_at
            FROM review_templates t
            JOIN template_assignments a ON a.template_id = t.id
            WHERE a.manager_id = $1
            ORDER BY t.created_at
            "#,
        )
        .bind(manager_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("fetch assigned templates"))?;

        rows.into_iter().map(row_to_template).collect()
    }
}

fn row_to_template(row: PgRow) -> Result<ReviewTemplate, DomainError> {
    let id: uuid::Uuid = column(&row, "id")?;
    let created_at: DateTime<Utc> = column(&row, "created_at")?;

    Ok(ReviewTemplate::reconstitute(
        TemplateId::from_uuid(id),
        column(&row, "name")?,
        json_column(&row, "items")?,
        Timestamp::from_datetime(created_at),
    ))
}
