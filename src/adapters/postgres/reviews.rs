//! PostgreSQL implementation of ReviewRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::domain::foundation::{
    DepartmentId, DomainError, ErrorCode, Period, ReviewId, Role, TemplateId, Timestamp, UserId,
};
use crate::domain::review::{PerformanceReview, ReviewStatus, ReviewSubject};
use crate::ports::{ReviewFilter, ReviewRepository};

use super::{column, db_error, json_column, period_column, to_json, user_id_column};

const SELECT_REVIEW: &str = r#"
    SELECT id, employee_id, employee_name, employee_role, department_id, department_name,
           manager_id, template_id, template_name, period, status, scores,
           average_score, kpi_score, manager_observations, feedback_for_employee,
           admin_feedback_for_manager, created_at, updated_at, completed_at
    FROM performance_reviews
"#;

/// PostgreSQL implementation of ReviewRepository.
#[derive(Clone)]
pub struct PostgresReviewRepository {
    pool: PgPool,
}

impl PostgresReviewRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Inserts unless the (employee, period) pair already has a review.
async fn insert_review<'e, E>(
    executor: E,
    review: &PerformanceReview,
) -> Result<bool, DomainError>
where
    E: sqlx::Executor<'e, Database = Postgres>,
{
    let subject = review.subject();
    let result = sqlx::query(
        r#"
        INSERT INTO performance_reviews (
            id, employee_id, employee_name, employee_role, department_id, department_name,
            manager_id, template_id, template_name, period, status, scores,
            average_score, kpi_score, manager_observations, feedback_for_employee,
            admin_feedback_for_manager, created_at, updated_at, completed_at
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18, $19, $20)
        ON CONFLICT (employee_id, period) DO NOTHING
        "#,
    )
    .bind(review.id().as_uuid())
    .bind(subject.employee_id.as_str())
    .bind(&subject.employee_name)
    .bind(subject.employee_role.as_str())
    .bind(subject.department_id.map(|d| *d.as_uuid()))
    .bind(&subject.department_name)
    .bind(subject.manager_id.as_str())
    .bind(review.template_id().as_uuid())
    .bind(review.template_name())
    .bind(review.period().to_string())
    .bind(review.status().as_str())
    .bind(to_json(review.scores())?)
    .bind(review.average_score())
    .bind(review.kpi_score())
    .bind(review.manager_observations())
    .bind(review.feedback_for_employee())
    .bind(review.admin_feedback_for_manager())
    .bind(*review.created_at().as_datetime())
    .bind(*review.updated_at().as_datetime())
    .bind(review.completed_at().map(|t| *t.as_datetime()))
    .execute(executor)
    .await
    .map_err(db_error("insert review"))?;

    Ok(result.rows_affected() == 1)
}

/// Overwrites the mutable columns of an existing review.
async fn update_review<'e, E>(
    executor: E,
    review: &PerformanceReview,
) -> Result<(), DomainError>
where
    E: sqlx::Executor<'e, Database = Postgres>,
{
    let result = sqlx::query(
        r#"
        UPDATE performance_reviews
        SET status = $2, scores = $3, average_score = $4, kpi_score = $5,
            manager_observations = $6, feedback_for_employee = $7,
            admin_feedback_for_manager = $8, updated_at = $9, completed_at = $10
        WHERE id = $1
        "#,
    )
    .bind(review.id().as_uuid())
    .bind(review.status().as_str())
    .bind(to_json(review.scores())?)
    .bind(review.average_score())
    .bind(review.kpi_score())
    .bind(review.manager_observations())
    .bind(review.feedback_for_employee())
    .bind(review.admin_feedback_for_manager())
    .bind(*review.updated_at().as_datetime())
    .bind(review.completed_at().map(|t| *t.as_datetime()))
    .execute(executor)
    .await
    .map_err(db_error("update review"))?;

    if result.rows_affected() == 0 {
        return Err(not_found(&review.id()));
    }
    Ok(())
}

#[async_trait]
impl ReviewRepository for PostgresReviewRepository {
    async fn insert_if_absent(&self, review: &PerformanceReview) -> Result<bool, DomainError> {
        insert_review(&self.pool, review).await
    }

    async fn insert_all_if_absent(
        &self,
        reviews: &[PerformanceReview],
    ) -> Result<Vec<ReviewId>, DomainError> {
        let mut tx = self.pool.begin().await.map_err(db_error("start transaction"))?;

        let mut inserted = Vec::new();
        for review in reviews {
            if insert_review(&mut *tx, review).await? {
                inserted.push(review.id());
            }
        }

        tx.commit().await.map_err(db_error("commit transaction"))?;
        Ok(inserted)
    }

    async fn update(&self, review: &PerformanceReview) -> Result<(), DomainError> {
        update_review(&self.pool, review).await
    }

    async fn find_by_id(&self, id: &ReviewId) -> Result<Option<PerformanceReview>, DomainError> {
        let row = sqlx::query(&format!("{} WHERE id = $1", SELECT_REVIEW))
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("fetch review"))?;

        row.map(row_to_review).transpose()
    }

    async fn find(&self, filter: &ReviewFilter) -> Result<Vec<PerformanceReview>, DomainError> {
        let mut query: QueryBuilder<Postgres> = QueryBuilder::new(SELECT_REVIEW);
        query.push(" WHERE TRUE");

        if let Some(ids) = &filter.employee_ids {
            let ids: Vec<String> = ids.iter().map(|id| id.as_str().to_string()).collect();
            query.push(" AND employee_id = ANY(").push_bind(ids).push(")");
        }
        if let Some(manager_id) = &filter.manager_id {
            query
                .push(" AND manager_id = ")
                .push_bind(manager_id.as_str().to_string());
        }
        if let Some(department_id) = filter.department_id {
            query
                .push(" AND department_id = ")
                .push_bind(*department_id.as_uuid());
        }
        if let Some(period) = filter.period {
            query.push(" AND period = ").push_bind(period.to_string());
        }
        if let Some(status) = filter.status {
            query.push(" AND status = ").push_bind(status.as_str());
        }
        query.push(" ORDER BY created_at");

        let rows = query
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("fetch reviews"))?;

        rows.into_iter().map(row_to_review).collect()
    }

    async fn find_for_employee(
        &self,
        employee_id: &UserId,
        period: Period,
    ) -> Result<Option<PerformanceReview>, DomainError> {
        let row = sqlx::query(&format!(
            "{} WHERE employee_id = $1 AND period = $2",
            SELECT_REVIEW
        ))
        .bind(employee_id.as_str())
        .bind(period.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("fetch review for employee"))?;

        row.map(row_to_review).transpose()
    }

    async fn delete(&self, id: &ReviewId) -> Result<(), DomainError> {
        // Observations and diary entries go with it (ON DELETE CASCADE).
        let result = sqlx::query("DELETE FROM performance_reviews WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(db_error("delete review"))?;

        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }
        Ok(())
    }
}

fn not_found(id: &ReviewId) -> DomainError {
    DomainError::new(ErrorCode::ReviewNotFound, format!("Review not found: {}", id))
}

fn row_to_review(row: PgRow) -> Result<PerformanceReview, DomainError> {
    let role_str: String = column(&row, "employee_role")?;
    let employee_role = Role::parse(&role_str).ok_or_else(|| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid employee role: {}", role_str),
        )
    })?;

    let status_str: String = column(&row, "status")?;
    let status = ReviewStatus::parse(&status_str).ok_or_else(|| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid review status: {}", status_str),
        )
    })?;

    let department_id: Option<uuid::Uuid> = column(&row, "department_id")?;
    let subject = ReviewSubject {
        employee_id: user_id_column(&row, "employee_id")?,
        employee_name: column(&row, "employee_name")?,
        employee_role,
        department_id: department_id.map(DepartmentId::from_uuid),
        department_name: column(&row, "department_name")?,
        manager_id: user_id_column(&row, "manager_id")?,
    };

    let id: uuid::Uuid = column(&row, "id")?;
    let template_id: uuid::Uuid = column(&row, "template_id")?;
    let created_at: DateTime<Utc> = column(&row, "created_at")?;
    let updated_at: DateTime<Utc> = column(&row, "updated_at")?;
    let completed_at: Option<DateTime<Utc>> = column(&row, "completed_at")?;

    Ok(PerformanceReview::reconstitute(
        ReviewId::from_uuid(id),
        subject,
        TemplateId::from_uuid(template_id),
        column(&row, "template_name")?,
        period_column(&row, "period")?,
        status,
        json_column(&row, "scores")?,
        column(&row, "average_score")?,
        column(&row, "kpi_score")?,
        column(&row, "manager_observations")?,
        column(&row, "feedback_for_employee")?,
        column(&row, "admin_feedback_for_manager")?,
        Timestamp::from_datetime(created_at),
        Timestamp::from_datetime(updated_at),
        completed_at.map(Timestamp::from_datetime),
    ))
}
