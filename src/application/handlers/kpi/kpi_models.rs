//! KPI model configuration handlers.

use std::sync::Arc;

use crate::domain::foundation::{Actor, CommandMetadata, DepartmentId};
use crate::domain::kpi::{KpiError, KpiIndicator, KpiModel};
use crate::ports::{KpiModelRepository, OrgDirectory};

/// Replaces a department's indicator list.
#[derive(Debug, Clone)]
pub struct SaveKpiModelCommand {
    pub department_id: DepartmentId,
    pub indicators: Vec<KpiIndicator>,
}

pub struct SaveKpiModelHandler {
    models: Arc<dyn KpiModelRepository>,
    directory: Arc<dyn OrgDirectory>,
}

impl SaveKpiModelHandler {
    pub fn new(models: Arc<dyn KpiModelRepository>, directory: Arc<dyn OrgDirectory>) -> Self {
        Self { models, directory }
    }

    pub async fn handle(
        &self,
        cmd: SaveKpiModelCommand,
        metadata: CommandMetadata,
    ) -> Result<KpiModel, KpiError> {
        if !metadata.capabilities().manage_configuration {
            return Err(KpiError::forbidden());
        }
        if self
            .directory
            .find_department(&cmd.department_id)
            .await?
            .is_none()
        {
            return Err(KpiError::DepartmentNotFound(cmd.department_id));
        }

        let indicators = cmd
            .indicators
            .into_iter()
            .map(KpiIndicator::validated)
            .collect::<Result<Vec<_>, _>>()?;
        let model = match self.models.find_by_department(&cmd.department_id).await? {
            Some(mut model) => {
                model.replace_indicators(indicators)?;
                model
            }
            None => KpiModel::new(cmd.department_id, indicators)?,
        };

        self.models.save(&model).await?;
        tracing::info!(department_id = %cmd.department_id, indicators = model.indicators().len(), "KPI model saved");
        Ok(model)
    }
}

#[derive(Debug, Clone)]
pub struct ListKpiModelsQuery {
    pub actor: Actor,
}

pub struct ListKpiModelsHandler {
    models: Arc<dyn KpiModelRepository>,
}

impl ListKpiModelsHandler {
    pub fn new(models: Arc<dyn KpiModelRepository>) -> Self {
        Self { models }
    }

    pub async fn handle(&self, query: ListKpiModelsQuery) -> Result<Vec<KpiModel>, KpiError> {
        let caps = query.actor.capabilities();
        if !caps.manage_configuration && !caps.process_kpi {
            return Err(KpiError::forbidden());
        }
        Ok(self.models.list().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::*;
    use crate::domain::foundation::Role;
    use crate::domain::kpi::{GoalCondition, IndicatorType};

    fn indicator(name: &str) -> KpiIndicator {
        KpiIndicator::new(name, 3.0, 10.0, IndicatorType::Neutral, GoalCondition::Above).unwrap()
    }

    #[tokio::test]
    async fn saving_twice_keeps_one_model_per_department() {
        let env = TestEnv::new().await;
        let handler = SaveKpiModelHandler::new(env.store.clone(), env.store.clone());

        let first = handler
            .handle(
                SaveKpiModelCommand {
                    department_id: env.sales.id(),
                    indicators: vec![indicator("Visitas")],
                },
                admin(),
            )
            .await
            .unwrap();
        let second = handler
            .handle(
                SaveKpiModelCommand {
                    department_id: env.sales.id(),
                    indicators: vec![indicator("Visitas"), indicator("Contratos")],
                },
                admin(),
            )
            .await
            .unwrap();

        assert_eq!(first.id(), second.id());
        let models = ListKpiModelsHandler::new(env.store.clone())
            .handle(ListKpiModelsQuery {
                actor: Actor::new(uid(ADMIN), Role::Administrator),
            })
            .await
            .unwrap();
        assert_eq!(models.len(), 1);
        assert_eq!(models[0].indicators().len(), 2);
    }

    #[tokio::test]
    async fn rejects_empty_models_and_unknown_departments() {
        let env = TestEnv::new().await;
        let handler = SaveKpiModelHandler::new(env.store.clone(), env.store.clone());

        let empty = handler
            .handle(
                SaveKpiModelCommand {
                    department_id: env.sales.id(),
                    indicators: vec![],
                },
                admin(),
            )
            .await;
        assert!(matches!(empty, Err(KpiError::ValidationFailed { .. })));

        let unknown = handler
            .handle(
                SaveKpiModelCommand {
                    department_id: DepartmentId::new(),
                    indicators: vec![indicator("Visitas")],
                },
                admin(),
            )
            .await;
        assert!(matches!(unknown, Err(KpiError::DepartmentNotFound(_))));
    }

    #[tokio::test]
    async fn managers_cannot_configure_models() {
        let env = TestEnv::new().await;
        let err = SaveKpiModelHandler::new(env.store.clone(), env.store.clone())
            .handle(
                SaveKpiModelCommand {
                    department_id: env.sales.id(),
                    indicators: vec![indicator("Visitas")],
                },
                manager(),
            )
            .await
            .unwrap_err();
        assert_eq!(err, KpiError::Forbidden);
    }
}
