//! PostgreSQL implementation of BonusParametersStore.
//!
//! Each table is one JSONB row keyed by kind. Stored rows are read back
//! without re-validation so their order is preserved.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use sqlx::PgPool;

use crate::domain::bonus::{BonusTable, KpiBonusRule, PerformanceBonusRule};
use crate::domain::foundation::DomainError;
use crate::ports::BonusParametersStore;

use super::{db_error, json_column, to_json};

const PERFORMANCE: &str = "performance";
const KPI: &str = "kpi";

/// PostgreSQL implementation of BonusParametersStore.
#[derive(Clone)]
pub struct PostgresBonusParametersStore {
    pool: PgPool,
}

impl PostgresBonusParametersStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn load<R: DeserializeOwned + Send>(&self, kind: &str) -> Result<Option<Vec<R>>, DomainError> {
        let row = sqlx::query("SELECT rules FROM bonus_parameters WHERE kind = $1")
            .bind(kind)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("load bonus rules"))?;

        row.map(|row| json_column(&row, "rules")).transpose()
    }

    async fn store<R: Serialize + Sync>(&self, kind: &str, rules: &[R]) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO bonus_parameters (kind, rules, updated_at)
            VALUES ($1, $2, NOW())
            ON CONFLICT (kind) DO UPDATE SET rules = EXCLUDED.rules, updated_at = NOW()
            "#,
        )
        .bind(kind)
        .bind(to_json(&rules)?)
        .execute(&self.pool)
        .await
        .map_err(db_error("save bonus rules"))?;

        Ok(())
    }
}

#[async_trait]
impl BonusParametersStore for PostgresBonusParametersStore {
    async fn load_performance_rules(
        &self,
    ) -> Result<Option<BonusTable<PerformanceBonusRule>>, DomainError> {
        Ok(self.load(PERFORMANCE).await?.map(BonusTable::from_stored))
    }

    async fn save_performance_rules(
        &self,
        rules: &BonusTable<PerformanceBonusRule>,
    ) -> Result<(), DomainError> {
        self.store(PERFORMANCE, rules.rules()).await
    }

    async fn load_kpi_rules(&self) -> Result<Option<BonusTable<KpiBonusRule>>, DomainError> {
        Ok(self.load(KPI).await?.map(BonusTable::from_stored))
    }

    async fn save_kpi_rules(&self, rules: &BonusTable<KpiBonusRule>) -> Result<(), DomainError> {
        self.store(KPI, rules.rules()).await
    }
}
