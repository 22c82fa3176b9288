//! PostgreSQL adapters.
//!
//! One repository type per port, each holding a cloned `PgPool`. Schema lives
//! in `migrations/` and is applied with [`run_migrations`] at startup.

mod bonus;
mod dashboard;
mod kpi;
mod observations;
mod org;
mod reviews;
mod templates;

pub use bonus::PostgresBonusParametersStore;
pub use dashboard::PostgresDashboardSettingsStore;
pub use kpi::{PostgresKpiAssessmentRepository, PostgresKpiModelRepository};
pub use observations::PostgresObservationRepository;
pub use org::PostgresOrgDirectory;
pub use reviews::PostgresReviewRepository;
pub use templates::PostgresTemplateRepository;

use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use crate::domain::foundation::{DomainError, ErrorCode, Period, UserId};

/// Applies pending schema migrations.
pub async fn run_migrations(pool: &PgPool) -> Result<(), DomainError> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to run migrations: {}", e),
            )
        })
}

/// Maps a driver error to a `DatabaseError` describing the failed action.
pub(crate) fn db_error(action: &'static str) -> impl Fn(sqlx::Error) -> DomainError {
    move |e| DomainError::new(ErrorCode::DatabaseError, format!("Failed to {}: {}", action, e))
}

/// Reads a column, reporting which one failed.
pub(crate) fn column<'r, T>(row: &'r PgRow, name: &str) -> Result<T, DomainError>
where
    T: sqlx::Decode<'r, sqlx::Postgres> + sqlx::Type<sqlx::Postgres>,
{
    row.try_get(name).map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Failed to get {}: {}", name, e),
        )
    })
}

/// Decodes a JSONB column into a domain value.
pub(crate) fn json_column<T: serde::de::DeserializeOwned>(
    row: &PgRow,
    name: &str,
) -> Result<T, DomainError> {
    let value: serde_json::Value = column(row, name)?;
    serde_json::from_value(value).map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid {} payload: {}", name, e),
        )
    })
}

/// Encodes a domain value for a JSONB column.
pub(crate) fn to_json<T: serde::Serialize>(value: &T) -> Result<serde_json::Value, DomainError> {
    serde_json::to_value(value).map_err(|e| {
        DomainError::new(
            ErrorCode::InternalError,
            format!("Failed to serialize payload: {}", e),
        )
    })
}

/// Parses a stored `YYYY-MM` period.
pub(crate) fn period_column(
    row: &PgRow,
    name: &str,
) -> Result<Period, DomainError> {
    let raw: String = column(row, name)?;
    raw.parse().map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid stored period {}: {}", raw, e),
        )
    })
}

/// Parses a stored user id.
pub(crate) fn user_id_column(
    row: &PgRow,
    name: &str,
) -> Result<UserId, DomainError> {
    let raw: String = column(row, name)?;
    UserId::new(raw).map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid stored {}: {}", name, e),
        )
    })
}
