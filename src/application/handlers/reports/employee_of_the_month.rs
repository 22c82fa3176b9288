//! Employee of the month card on the dashboard.
//!
//! Managers see their own team's best completed review. Everyone else sees
//! the card an administrator saved, or a placeholder until there is one.

use std::sync::Arc;

use crate::domain::foundation::{Actor, CommandMetadata, Period, Role};
use crate::domain::reports::{team_highlight, EmployeeOfTheMonth, ReportError};
use crate::ports::{DashboardSettingsStore, OrgDirectory, ReviewFilter, ReviewRepository};

#[derive(Debug, Clone)]
pub struct EmployeeOfTheMonthQuery {
    pub actor: Actor,
    /// Only used for managers.
    pub period: Period,
}

#[derive(Debug, Clone)]
pub struct UpdateEmployeeOfTheMonthCommand {
    pub name: String,
    pub role: String,
    pub reason: String,
    pub image_url: Option<String>,
}

pub struct EmployeeOfTheMonthHandler {
    reviews: Arc<dyn ReviewRepository>,
    directory: Arc<dyn OrgDirectory>,
    settings: Arc<dyn DashboardSettingsStore>,
}

impl EmployeeOfTheMonthHandler {
    pub fn new(
        reviews: Arc<dyn ReviewRepository>,
        directory: Arc<dyn OrgDirectory>,
        settings: Arc<dyn DashboardSettingsStore>,
    ) -> Self {
        Self {
            reviews,
            directory,
            settings,
        }
    }

    /// `None` only for a manager whose team has no completed review.
    pub async fn get(
        &self,
        query: EmployeeOfTheMonthQuery,
    ) -> Result<Option<EmployeeOfTheMonth>, ReportError> {
        if query.actor.role == Role::Manager {
            let chart = self.directory.org_chart().await?;
            let reviews = self
                .reviews
                .find(&ReviewFilter::for_period(query.period))
                .await?;
            let highlight = team_highlight(&query.actor.user_id, &chart, &reviews, query.period);
            return Ok(highlight.as_ref().map(EmployeeOfTheMonth::from_highlight));
        }

        let stored = self.settings.load_employee_of_the_month().await?;
        Ok(Some(stored.unwrap_or_else(EmployeeOfTheMonth::awaiting_hr)))
    }

    pub async fn update(
        &self,
        cmd: UpdateEmployeeOfTheMonthCommand,
        metadata: CommandMetadata,
    ) -> Result<EmployeeOfTheMonth, ReportError> {
        if !metadata.capabilities().manage_configuration {
            return Err(ReportError::forbidden());
        }
        let card = EmployeeOfTheMonth::new(cmd.name, cmd.role, cmd.reason, cmd.image_url)?;
        self.settings.save_employee_of_the_month(&card).await?;
        tracing::info!(
            name = %card.name,
            updated_by = %metadata.user_id(),
            "employee of the month updated"
        );
        Ok(card)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::reports::fixtures::completed_review;
    use crate::application::handlers::test_support::*;

    fn handler(env: &TestEnv) -> EmployeeOfTheMonthHandler {
        EmployeeOfTheMonthHandler::new(env.store.clone(), env.store.clone(), env.store.clone())
    }

    fn query(id: &str, role: Role, p: Period) -> EmployeeOfTheMonthQuery {
        EmployeeOfTheMonthQuery {
            actor: Actor::new(uid(id), role),
            period: p,
        }
    }

    fn card() -> UpdateEmployeeOfTheMonthCommand {
        UpdateEmployeeOfTheMonthCommand {
            name: "Carla".to_string(),
            role: "Analista de Operações".to_string(),
            reason: "Reduziu o retrabalho pela metade.".to_string(),
            image_url: None,
        }
    }

    #[tokio::test]
    async fn non_managers_see_placeholder_until_a_card_is_saved() {
        let env = TestEnv::new().await;
        let handler = handler(&env);
        let p = period("2024-04");

        for (id, role) in [(ADMIN, Role::Administrator), (ANA, Role::Collaborator)] {
            let shown = handler.get(query(id, role, p)).await.unwrap().unwrap();
            assert_eq!(shown, EmployeeOfTheMonth::awaiting_hr());
        }

        handler.update(card(), admin()).await.unwrap();

        for (id, role) in [(ADMIN, Role::Administrator), (ANA, Role::Collaborator)] {
            let shown = handler.get(query(id, role, p)).await.unwrap().unwrap();
            assert_eq!(shown.name, "Carla");
            assert_eq!(shown.role, "Analista de Operações");
        }
    }

    #[tokio::test]
    async fn managers_keep_their_team_highlight() {
        let env = TestEnv::new().await;
        let handler = handler(&env);
        let p = period("2024-04");
        handler.update(card(), admin()).await.unwrap();

        assert!(handler.get(query(MANAGER, Role::Manager, p)).await.unwrap().is_none());

        completed_review(&env, BRUNO, p, &[9, 9, 9]).await;
        let shown = handler
            .get(query(MANAGER, Role::Manager, p))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(shown.name, "Bruno");
        assert_eq!(shown.reason, "Destaque do mês na equipe com nota 9.0.");
    }

    #[tokio::test]
    async fn only_administrators_update_and_input_is_validated() {
        let env = TestEnv::new().await;
        let handler = handler(&env);

        let forbidden = handler.update(card(), manager()).await.unwrap_err();
        assert_eq!(forbidden, ReportError::Forbidden);

        let mut blank = card();
        blank.reason = "  ".to_string();
        let invalid = handler.update(blank, admin()).await.unwrap_err();
        assert!(matches!(invalid, ReportError::ValidationFailed { .. }));

        assert!(env.store.load_employee_of_the_month().await.unwrap().is_none());
    }
}
