use async_trait::async_trait;

use crate::domain::bonus::{BonusTable, KpiBonusRule, PerformanceBonusRule};
use crate::domain::foundation::DomainError;
use crate::ports::BonusParametersStore;

use super::InMemoryStore;

#[async_trait]
impl BonusParametersStore for InMemoryStore {
    async fn load_performance_rules(
        &self,
    ) -> Result<Option<BonusTable<PerformanceBonusRule>>, DomainError> {
        Ok(self.read()?.performance_rules.clone())
    }

    async fn save_performance_rules(
        &self,
        rules: &BonusTable<PerformanceBonusRule>,
    ) -> Result<(), DomainError> {
        self.write()?.performance_rules = Some(rules.clone());
        Ok(())
    }

    async fn load_kpi_rules(&self) -> Result<Option<BonusTable<KpiBonusRule>>, DomainError> {
        Ok(self.read()?.kpi_rules.clone())
    }

    async fn save_kpi_rules(&self, rules: &BonusTable<KpiBonusRule>) -> Result<(), DomainError> {
        self.write()?.kpi_rules = Some(rules.clone());
        Ok(())
    }
}
