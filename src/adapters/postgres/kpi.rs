//! PostgreSQL implementations of the KPI model and assessment repositories.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::domain::foundation::{
    DepartmentId, DomainError, ErrorCode, KpiAssessmentId, KpiModelId, Period, Timestamp,
};
use crate::domain::kpi::{KpiAssessment, KpiModel};
use crate::ports::{KpiAssessmentRepository, KpiModelRepository, KpiReviewWrites};

use super::{column, db_error, json_column, period_column, to_json};

const SELECT_ASSESSMENT: &str = r#"
    SELECT id, department_id, department_name, period, kpi_score, results, indicators, assessed_at
    FROM kpi_assessments
"#;

/// PostgreSQL implementation of KpiModelRepository.
#[derive(Clone)]
pub struct PostgresKpiModelRepository {
    pool: PgPool,
}

impl PostgresKpiModelRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl KpiModelRepository for PostgresKpiModelRepository {
    async fn save(&self, model: &KpiModel) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO kpi_models (id, department_id, indicators, updated_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (department_id)
            DO UPDATE SET indicators = EXCLUDED.indicators, updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(model.id().as_uuid())
        .bind(model.department_id().as_uuid())
        .bind(to_json(&model.indicators())?)
        .bind(*model.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(db_error("save KPI model"))?;

        Ok(())
    }

    async fn find_by_department(
        &self,
        department_id: &DepartmentId,
    ) -> Result<Option<KpiModel>, DomainError> {
        let row = sqlx::query(
            "SELECT id, department_id, indicators, updated_at FROM kpi_models WHERE department_id = $1",
        )
        .bind(department_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("fetch KPI model"))?;

        row.map(row_to_model).transpose()
    }

    async fn list(&self) -> Result<Vec<KpiModel>, DomainError> {
        let rows = sqlx::query(
            "SELECT id, department_id, indicators, updated_at FROM kpi_models ORDER BY updated_at",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("list KPI models"))?;

        rows.into_iter().map(row_to_model).collect()
    }
}

/// PostgreSQL implementation of KpiAssessmentRepository.
///
/// Processing and deletion write the snapshot and patch the affected review
/// columns in a single transaction.
#[derive(Clone)]
pub struct PostgresKpiAssessmentRepository {
    pool: PgPool,
}

impl PostgresKpiAssessmentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl KpiAssessmentRepository for PostgresKpiAssessmentRepository {
    async fn find_by_id(&self, id: &KpiAssessmentId) -> Result<Option<KpiAssessment>, DomainError> {
        let row = sqlx::query(&format!("{} WHERE id = $1", SELECT_ASSESSMENT))
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("fetch KPI assessment"))?;

        row.map(row_to_assessment).transpose()
    }

    async fn find_by_department_and_period(
        &self,
        department_id: &DepartmentId,
        period: Period,
    ) -> Result<Option<KpiAssessment>, DomainError> {
        let row = sqlx::query(&format!(
            "{} WHERE department_id = $1 AND period = $2",
            SELECT_ASSESSMENT
        ))
        .bind(department_id.as_uuid())
        .bind(period.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("fetch KPI assessment"))?;

        row.map(row_to_assessment).transpose()
    }

    async fn list(
        &self,
        period: Option<Period>,
        department_id: Option<DepartmentId>,
    ) -> Result<Vec<KpiAssessment>, DomainError> {
        let mut query: QueryBuilder<Postgres> = QueryBuilder::new(SELECT_ASSESSMENT);
        query.push(" WHERE TRUE");
        if let Some(period) = period {
            query.push(" AND period = ").push_bind(period.to_string());
        }
        if let Some(department_id) = department_id {
            query
                .push(" AND department_id = ")
                .push_bind(*department_id.as_uuid());
        }
        query.push(" ORDER BY period DESC, department_name");

        let rows = query
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("list KPI assessments"))?;

        rows.into_iter().map(row_to_assessment).collect()
    }

    async fn commit_processing(
        &self,
        assessment: &KpiAssessment,
        now: Timestamp,
    ) -> Result<KpiReviewWrites, DomainError> {
        let mut tx = self.pool.begin().await.map_err(db_error("start transaction"))?;
        let department_id = *assessment.department_id().as_uuid();
        let period = assessment.period().to_string();
        let now = *now.as_datetime();

        let completed = sqlx::query(
            r#"
            UPDATE performance_reviews
            SET status = 'completed', completed_at = $1
            WHERE department_id = $2 AND period = $3 AND status = 'awaiting_approval'
            "#,
        )
        .bind(now)
        .bind(department_id)
        .bind(&period)
        .execute(&mut *tx)
        .await
        .map_err(db_error("complete reviews"))?;

        let affected = sqlx::query(
            r#"
            UPDATE performance_reviews
            SET kpi_score = $1, updated_at = $2
            WHERE department_id = $3 AND period = $4
            "#,
        )
        .bind(assessment.kpi_score())
        .bind(now)
        .bind(department_id)
        .bind(&period)
        .execute(&mut *tx)
        .await
        .map_err(db_error("apply KPI score"))?;

        if affected.rows_affected() == 0 {
            tx.rollback().await.map_err(db_error("rollback transaction"))?;
            return Ok(KpiReviewWrites::default());
        }

        sqlx::query("DELETE FROM kpi_assessments WHERE department_id = $1 AND period = $2")
            .bind(department_id)
            .bind(&period)
            .execute(&mut *tx)
            .await
            .map_err(db_error("replace KPI assessment"))?;

        sqlx::query(
            r#"
            INSERT INTO kpi_assessments (
                id, department_id, department_name, period, kpi_score, results, indicators, assessed_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(assessment.id().as_uuid())
        .bind(department_id)
        .bind(assessment.department_name())
        .bind(&period)
        .bind(assessment.kpi_score())
        .bind(to_json(assessment.results())?)
        .bind(to_json(&assessment.indicators())?)
        .bind(*assessment.assessed_at().as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(db_error("insert KPI assessment"))?;

        tx.commit().await.map_err(db_error("commit transaction"))?;
        Ok(KpiReviewWrites {
            affected: affected.rows_affected() as usize,
            completed: completed.rows_affected() as usize,
        })
    }

    async fn commit_deletion(&self, id: &KpiAssessmentId) -> Result<usize, DomainError> {
        let mut tx = self.pool.begin().await.map_err(db_error("start transaction"))?;

        let deleted: Option<(uuid::Uuid, String)> = sqlx::query_as(
            "DELETE FROM kpi_assessments WHERE id = $1 RETURNING department_id, period",
        )
        .bind(id.as_uuid())
        .fetch_optional(&mut *tx)
        .await
        .map_err(db_error("delete KPI assessment"))?;

        let Some((department_id, period)) = deleted else {
            return Err(DomainError::new(
                ErrorCode::AssessmentNotFound,
                format!("KPI assessment not found: {}", id),
            ));
        };

        let cleared = sqlx::query(
            r#"
            UPDATE performance_reviews
            SET kpi_score = NULL, updated_at = $1
            WHERE department_id = $2 AND period = $3
            "#,
        )
        .bind(Utc::now())
        .bind(department_id)
        .bind(period)
        .execute(&mut *tx)
        .await
        .map_err(db_error("clear KPI scores"))?;

        tx.commit().await.map_err(db_error("commit transaction"))?;
        Ok(cleared.rows_affected() as usize)
    }
}

fn row_to_model(row: PgRow) -> Result<KpiModel, DomainError> {
    let id: uuid::Uuid = column(&row, "id")?;
    let department_id: uuid::Uuid = column(&row, "department_id")?;
    let updated_at: DateTime<Utc> = column(&row, "updated_at")?;

    Ok(KpiModel::reconstitute(
        KpiModelId::from_uuid(id),
        DepartmentId::from_uuid(department_id),
        json_column(&row, "indicators")?,
        Timestamp::from_datetime(updated_at),
    ))
}

fn row_to_assessment(row: PgRow) -> Result<KpiAssessment, DomainError> {
    let id: uuid::Uuid = column(&row, "id")?;
    let department_id: uuid::Uuid = column(&row, "department_id")?;
    let assessed_at: DateTime<Utc> = column(&row, "assessed_at")?;

    Ok(KpiAssessment::reconstitute(
        KpiAssessmentId::from_uuid(id),
        DepartmentId::from_uuid(department_id),
        column(&row, "department_name")?,
        period_column(&row, "period")?,
        column(&row, "kpi_score")?,
        json_column(&row, "results")?,
        json_column(&row, "indicators")?,
        Timestamp::from_datetime(assessed_at),
    ))
}
