//! LeaderboardHandler - Ranks managers by their team's results.

use std::sync::Arc;

use crate::domain::foundation::{Actor, Period};
use crate::domain::reports::{build_leaderboard, LeaderboardRow, ReportError};
use crate::ports::{BonusParametersStore, OrgDirectory, ReviewFilter, ReviewRepository};

use super::super::bonus::load_bonus_parameters;

#[derive(Debug, Clone)]
pub struct LeaderboardQuery {
    pub actor: Actor,
    pub period: Period,
}

pub struct LeaderboardHandler {
    reviews: Arc<dyn ReviewRepository>,
    directory: Arc<dyn OrgDirectory>,
    bonus: Arc<dyn BonusParametersStore>,
}

impl LeaderboardHandler {
    pub fn new(
        reviews: Arc<dyn ReviewRepository>,
        directory: Arc<dyn OrgDirectory>,
        bonus: Arc<dyn BonusParametersStore>,
    ) -> Self {
        Self {
            reviews,
            directory,
            bonus,
        }
    }

    pub async fn handle(&self, query: LeaderboardQuery) -> Result<Vec<LeaderboardRow>, ReportError> {
        if !query.actor.capabilities().view_all_reviews {
            return Err(ReportError::forbidden());
        }
        let chart = self.directory.org_chart().await?;
        let reviews = self
            .reviews
            .find(&ReviewFilter::for_period(query.period))
            .await?;
        let params = load_bonus_parameters(self.bonus.as_ref()).await?;
        Ok(build_leaderboard(&chart, &reviews, query.period, &params))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::reports::fixtures::completed_review;
    use crate::application::handlers::test_support::*;
    use crate::domain::foundation::Role;

    #[tokio::test]
    async fn ranks_managers_by_team_average() {
        let env = TestEnv::new().await;
        let p = period("2024-04");
        completed_review(&env, ANA, p, &[6, 6, 6]).await;
        completed_review(&env, BRUNO, p, &[8, 8, 8]).await;
        completed_review(&env, CARLA, p, &[9, 9, 9]).await;

        let rows = LeaderboardHandler::new(env.store.clone(), env.store.clone(), env.store.clone())
            .handle(LeaderboardQuery {
                actor: Actor::new(uid(ADMIN), Role::Administrator),
                period: p,
            })
            .await
            .unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].manager_name, "Nuno");
        assert_eq!(rows[1].manager_name, "Marta");
        assert_eq!(rows[1].average_score, 7.0);
        assert_eq!(rows[1].total_reviews, 2);
    }

    #[tokio::test]
    async fn managers_cannot_see_the_leaderboard() {
        let env = TestEnv::new().await;
        let err = LeaderboardHandler::new(env.store.clone(), env.store.clone(), env.store.clone())
            .handle(LeaderboardQuery {
                actor: Actor::new(uid(MANAGER), Role::Manager),
                period: Period::current(),
            })
            .await
            .unwrap_err();
        assert_eq!(err, ReportError::Forbidden);
    }
}
