//! PostgreSQL implementation of ObservationRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::domain::foundation::{
    DiaryEntryId, DomainError, ErrorCode, ObservationId, ReviewId, Timestamp,
};
use crate::domain::review::{DiaryEntry, WeeklyObservation};
use crate::ports::{DiaryFilter, ObservationRepository};

use super::{column, db_error, user_id_column};

/// PostgreSQL implementation of ObservationRepository.
#[derive(Clone)]
pub struct PostgresObservationRepository {
    pool: PgPool,
}

impl PostgresObservationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ObservationRepository for PostgresObservationRepository {
    async fn add_weekly(&self, observation: &WeeklyObservation) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO weekly_observations (id, review_id, text, author_id, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(observation.id.as_uuid())
        .bind(observation.review_id.as_uuid())
        .bind(&observation.text)
        .bind(observation.author_id.as_str())
        .bind(*observation.created_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(db_error("insert observation"))?;

        Ok(())
    }

    async fn find_weekly(&self, id: &ObservationId) -> Result<Option<WeeklyObservation>, DomainError> {
        let row = sqlx::query(
            "SELECT id, review_id, text, author_id, created_at FROM weekly_observations WHERE id = $1",
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("fetch observation"))?;

        row.map(row_to_observation).transpose()
    }

    async fn delete_weekly(&self, id: &ObservationId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM weekly_observations WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(db_error("delete observation"))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::ObservationNotFound,
                format!("Observation not found: {}", id),
            ));
        }
        Ok(())
    }

    async fn list_weekly(&self, review_id: &ReviewId) -> Result<Vec<WeeklyObservation>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, review_id, text, author_id, created_at
            FROM weekly_observations
            WHERE review_id = $1
            ORDER BY created_at
            "#,
        )
        .bind(review_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("list observations"))?;

        rows.into_iter().map(row_to_observation).collect()
    }

    async fn add_diary_entry(&self, entry: &DiaryEntry) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO diary_entries (
                id, review_id, text, employee_id, employee_name, author_id, author_name, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(entry.id.as_uuid())
        .bind(entry.review_id.as_uuid())
        .bind(&entry.text)
        .bind(entry.employee_id.as_str())
        .bind(&entry.employee_name)
        .bind(entry.author_id.as_str())
        .bind(&entry.author_name)
        .bind(*entry.created_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(db_error("insert diary entry"))?;

        Ok(())
    }

    async fn list_diary(&self, filter: &DiaryFilter) -> Result<Vec<DiaryEntry>, DomainError> {
        let mut query: QueryBuilder<Postgres> = QueryBuilder::new(
            r#"
            SELECT id, review_id, text, employee_id, employee_name, author_id, author_name, created_at
            FROM diary_entries
            WHERE TRUE
            "#,
        );
        if let Some(period) = filter.period {
            let (start, end) = period.bounds();
            query
                .push(" AND created_at >= ")
                .push_bind(start)
                .push(" AND created_at < ")
                .push_bind(end);
        }
        if let Some(employee_id) = &filter.employee_id {
            query
                .push(" AND employee_id = ")
                .push_bind(employee_id.as_str().to_string());
        }
        if let Some(author_id) = &filter.author_id {
            query
                .push(" AND author_id = ")
                .push_bind(author_id.as_str().to_string());
        }
        query.push(" ORDER BY created_at DESC");

        let rows = query
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("list diary entries"))?;

        rows.into_iter().map(row_to_diary_entry).collect()
    }
}

fn row_to_observation(row: PgRow) -> Result<WeeklyObservation, DomainError> {
    let id: uuid::Uuid = column(&row, "id")?;
    let review_id: uuid::Uuid = column(&row, "review_id")?;
    let created_at: DateTime<Utc> = column(&row, "created_at")?;

    Ok(WeeklyObservation {
        id: ObservationId::from_uuid(id),
        review_id: ReviewId::from_uuid(review_id),
        text: column(&row, "text")?,
        author_id: user_id_column(&row, "author_id")?,
        created_at: Timestamp::from_datetime(created_at),
    })
}

fn row_to_diary_entry(row: PgRow) -> Result<DiaryEntry, DomainError> {
    let id: uuid::Uuid = column(&row, "id")?;
    let review_id: uuid::Uuid = column(&row, "review_id")?;
    let created_at: DateTime<Utc> = column(&row, "created_at")?;

    Ok(DiaryEntry {
        id: DiaryEntryId::from_uuid(id),
        review_id: ReviewId::from_uuid(review_id),
        text: column(&row, "text")?,
        employee_id: user_id_column(&row, "employee_id")?,
        employee_name: column(&row, "employee_name")?,
        author_id: user_id_column(&row, "author_id")?,
        author_name: column(&row, "author_name")?,
        created_at: Timestamp::from_datetime(created_at),
    })
}
