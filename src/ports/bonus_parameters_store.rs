//! Bonus parameters store port.

use async_trait::async_trait;

use crate::domain::bonus::{BonusTable, KpiBonusRule, PerformanceBonusRule};
use crate::domain::foundation::DomainError;

/// Persists the two bonus tier tables.
///
/// Loads return `None` until a table has been saved at least once.
#[async_trait]
pub trait BonusParametersStore: Send + Sync {
    async fn load_performance_rules(
        &self,
    ) -> Result<Option<BonusTable<PerformanceBonusRule>>, DomainError>;

    async fn save_performance_rules(
        &self,
        rules: &BonusTable<PerformanceBonusRule>,
    ) -> Result<(), DomainError>;

    async fn load_kpi_rules(&self) -> Result<Option<BonusTable<KpiBonusRule>>, DomainError>;

    async fn save_kpi_rules(&self, rules: &BonusTable<KpiBonusRule>) -> Result<(), DomainError>;
}
