//! PostgreSQL implementation of DashboardSettingsStore.
//!
//! Settings are JSONB values keyed by name in `dashboard_settings`.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::foundation::DomainError;
use crate::domain::reports::EmployeeOfTheMonth;
use crate::ports::DashboardSettingsStore;

use super::{db_error, json_column, to_json};

const EMPLOYEE_OF_THE_MONTH: &str = "employee_of_the_month";

#[derive(Clone)]
pub struct PostgresDashboardSettingsStore {
    pool: PgPool,
}

impl PostgresDashboardSettingsStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DashboardSettingsStore for PostgresDashboardSettingsStore {
    async fn load_employee_of_the_month(&self) -> Result<Option<EmployeeOfTheMonth>, DomainError> {
        let row = sqlx::query("SELECT value FROM dashboard_settings WHERE key = $1")
            .bind(EMPLOYEE_OF_THE_MONTH)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("load employee of the month"))?;

        row.map(|row| json_column(&row, "value")).transpose()
    }

    async fn save_employee_of_the_month(&self, card: &EmployeeOfTheMonth) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO dashboard_settings (key, value, updated_at)
            VALUES ($1, $2, NOW())
            ON CONFLICT (key) DO UPDATE SET value = EXCLUDED.value, updated_at = NOW()
            "#,
        )
        .bind(EMPLOYEE_OF_THE_MONTH)
        .bind(to_json(card)?)
        .execute(&self.pool)
        .await
        .map_err(db_error("save employee of the month"))?;

        Ok(())
    }
}
