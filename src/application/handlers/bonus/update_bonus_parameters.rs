//! Handlers replacing one of the bonus tier tables.
//!
//! Tables are validated and sorted before they are stored.

use std::sync::Arc;

use crate::domain::bonus::{
    BonusParametersUpdated, BonusTable, BonusTableKind, KpiBonusRule, PerformanceBonusRule,
};
use crate::domain::foundation::{CommandMetadata, EventId, Timestamp};
use crate::domain::reports::ReportError;
use crate::ports::{BonusParametersStore, EventPublisher};

use super::super::publish_event;

#[derive(Debug, Clone)]
pub struct UpdatePerformanceRulesCommand {
    pub rules: Vec<PerformanceBonusRule>,
}

#[derive(Debug, Clone)]
pub struct UpdateKpiRulesCommand {
    pub rules: Vec<KpiBonusRule>,
}

pub struct UpdateBonusParametersHandler {
    store: Arc<dyn BonusParametersStore>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl UpdateBonusParametersHandler {
    pub fn new(
        store: Arc<dyn BonusParametersStore>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            store,
            event_publisher,
        }
    }

    pub async fn update_performance_rules(
        &self,
        cmd: UpdatePerformanceRulesCommand,
        metadata: CommandMetadata,
    ) -> Result<BonusTable<PerformanceBonusRule>, ReportError> {
        authorize(&metadata)?;
        let table = BonusTable::new(cmd.rules)?;
        self.store.save_performance_rules(&table).await?;
        self.published(BonusTableKind::Performance, table.rules().len(), &metadata)
            .await;
        Ok(table)
    }

    pub async fn update_kpi_rules(
        &self,
        cmd: UpdateKpiRulesCommand,
        metadata: CommandMetadata,
    ) -> Result<BonusTable<KpiBonusRule>, ReportError> {
        authorize(&metadata)?;
        let table = BonusTable::new(cmd.rules)?;
        self.store.save_kpi_rules(&table).await?;
        self.published(BonusTableKind::Kpi, table.rules().len(), &metadata)
            .await;
        Ok(table)
    }

    async fn published(&self, table: BonusTableKind, rule_count: usize, metadata: &CommandMetadata) {
        tracing::info!(table = %table, rule_count, "bonus tiers updated");
        let event = BonusParametersUpdated {
            event_id: EventId::new(),
            table,
            rule_count,
            updated_by: metadata.user_id().clone(),
            updated_at: Timestamp::now(),
        };
        publish_event(self.event_publisher.as_ref(), &event, metadata).await;
    }
}

fn authorize(metadata: &CommandMetadata) -> Result<(), ReportError> {
    if metadata.capabilities().manage_configuration {
        Ok(())
    } else {
        Err(ReportError::forbidden())
    }
}
