//! GetBonusParametersHandler - Reads the tier tables, seeding defaults.

use std::sync::Arc;

use crate::domain::bonus::{
    BonusParameters, BonusTable, KpiBonusRule, PerformanceBonusRule, DEFAULT_KPI_RULES,
    DEFAULT_PERFORMANCE_RULES,
};
use crate::domain::foundation::{Actor, DomainError};
use crate::domain::reports::ReportError;
use crate::ports::BonusParametersStore;

#[derive(Debug, Clone)]
pub struct GetBonusParametersQuery {
    pub actor: Actor,
}

pub struct GetBonusParametersHandler {
    store: Arc<dyn BonusParametersStore>,
}

impl GetBonusParametersHandler {
    pub fn new(store: Arc<dyn BonusParametersStore>) -> Self {
        Self { store }
    }

    pub async fn performance_rules(
        &self,
        query: GetBonusParametersQuery,
    ) -> Result<BonusTable<PerformanceBonusRule>, ReportError> {
        authorize(&query.actor)?;
        Ok(load_performance_rules(self.store.as_ref()).await?)
    }

    pub async fn kpi_rules(
        &self,
        query: GetBonusParametersQuery,
    ) -> Result<BonusTable<KpiBonusRule>, ReportError> {
        authorize(&query.actor)?;
        Ok(load_kpi_rules(self.store.as_ref()).await?)
    }
}

fn authorize(actor: &Actor) -> Result<(), ReportError> {
    if actor.capabilities().manage_configuration {
        Ok(())
    } else {
        Err(ReportError::forbidden())
    }
}

/// Stored performance tiers, writing the defaults on first read.
pub(crate) async fn load_performance_rules(
    store: &dyn BonusParametersStore,
) -> Result<BonusTable<PerformanceBonusRule>, DomainError> {
    if let Some(table) = store.load_performance_rules().await? {
        return Ok(table);
    }
    tracing::info!("seeding default performance bonus tiers");
    let table = DEFAULT_PERFORMANCE_RULES.clone();
    store.save_performance_rules(&table).await?;
    Ok(table)
}

/// Stored KPI tiers, writing the defaults on first read.
pub(crate) async fn load_kpi_rules(
    store: &dyn BonusParametersStore,
) -> Result<BonusTable<KpiBonusRule>, DomainError> {
    if let Some(table) = store.load_kpi_rules().await? {
        return Ok(table);
    }
    tracing::info!("seeding default KPI bonus tiers");
    let table = DEFAULT_KPI_RULES.clone();
    store.save_kpi_rules(&table).await?;
    Ok(table)
}

/// Both tables, as used by the report handlers.
pub(crate) async fn load_bonus_parameters(
    store: &dyn BonusParametersStore,
) -> Result<BonusParameters, DomainError> {
    Ok(BonusParameters::new(
        load_performance_rules(store).await?,
        load_kpi_rules(store).await?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::*;
    use crate::domain::foundation::Role;

    fn admin_query() -> GetBonusParametersQuery {
        GetBonusParametersQuery {
            actor: Actor::new(uid(ADMIN), Role::Administrator),
        }
    }

    #[tokio::test]
    async fn first_read_seeds_defaults() {
        let env = TestEnv::new().await;
        assert!(env.store.load_kpi_rules().await.unwrap().is_none());

        let handler = GetBonusParametersHandler::new(env.store.clone());
        let kpi = handler.kpi_rules(admin_query()).await.unwrap();
        let performance = handler.performance_rules(admin_query()).await.unwrap();

        assert_eq!(kpi, *DEFAULT_KPI_RULES);
        assert_eq!(performance.rules().len(), 3);
        assert_eq!(env.store.load_kpi_rules().await.unwrap(), Some(kpi));
    }

    #[tokio::test]
    async fn stored_tables_win_over_defaults() {
        let env = TestEnv::new().await;
        let custom = BonusTable::new(vec![PerformanceBonusRule::new(0.0, 10.0, 80.0)]).unwrap();
        env.store.save_performance_rules(&custom).await.unwrap();

        let params = load_bonus_parameters(env.store.as_ref()).await.unwrap();
        assert_eq!(params.performance_percentage(5.0), 80.0);
        assert_eq!(params.kpi, *DEFAULT_KPI_RULES);
    }

    #[tokio::test]
    async fn collaborators_cannot_read_tables() {
        let env = TestEnv::new().await;
        let err = GetBonusParametersHandler::new(env.store.clone())
            .kpi_rules(GetBonusParametersQuery {
                actor: Actor::new(uid(ANA), Role::Collaborator),
            })
            .await
            .unwrap_err();
        assert_eq!(err, ReportError::Forbidden);
    }
}
