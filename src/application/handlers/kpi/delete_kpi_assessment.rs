//! DeleteKpiAssessmentHandler - Removes a snapshot and retracts its score.
//!
//! Reviews of the department and period at deletion time are cleared.
//! Reviews completed by the processing stay completed.

use std::sync::Arc;

use crate::domain::foundation::{CommandMetadata, EventId, KpiAssessmentId, Timestamp};
use crate::domain::kpi::{KpiAssessmentDeleted, KpiError};
use crate::ports::{EventPublisher, KpiAssessmentRepository};

use super::super::publish_event;

#[derive(Debug, Clone)]
pub struct DeleteKpiAssessmentCommand {
    pub assessment_id: KpiAssessmentId,
}

pub struct DeleteKpiAssessmentHandler {
    assessments: Arc<dyn KpiAssessmentRepository>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl DeleteKpiAssessmentHandler {
    pub fn new(
        assessments: Arc<dyn KpiAssessmentRepository>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            assessments,
            event_publisher,
        }
    }

    /// Returns the number of reviews whose score was cleared.
    pub async fn handle(
        &self,
        cmd: DeleteKpiAssessmentCommand,
        metadata: CommandMetadata,
    ) -> Result<usize, KpiError> {
        if !metadata.capabilities().process_kpi {
            return Err(KpiError::forbidden());
        }

        let assessment = self
            .assessments
            .find_by_id(&cmd.assessment_id)
            .await?
            .ok_or(KpiError::AssessmentNotFound(cmd.assessment_id))?;

        let cleared = self.assessments.commit_deletion(&assessment.id()).await?;

        tracing::info!(
            assessment_id = %assessment.id(),
            reviews_cleared = cleared,
            "KPI assessment deleted"
        );

        let event = KpiAssessmentDeleted {
            event_id: EventId::new(),
            assessment_id: assessment.id(),
            department_id: assessment.department_id(),
            period: assessment.period(),
            reviews_cleared: cleared,
            deleted_by: metadata.user_id().clone(),
            deleted_at: Timestamp::now(),
        };
        publish_event(self.event_publisher.as_ref(), &event, &metadata).await;

        Ok(cleared)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::kpi::{ProcessKpiResultsCommand, ProcessKpiResultsHandler};
    use crate::application::handlers::test_support::*;
    use crate::domain::foundation::{DepartmentId, Period, ReviewId};
    use crate::domain::kpi::{GoalCondition, IndicatorType, KpiIndicator};
    use crate::domain::review::ReviewStatus;
    use crate::ports::ReviewRepository;

    async fn process(env: &TestEnv, department_id: DepartmentId, p: Period) -> KpiAssessmentId {
        ProcessKpiResultsHandler::new(
            env.store.clone(),
            env.store.clone(),
            env.store.clone(),
            env.bus.clone(),
        )
        .handle(
            ProcessKpiResultsCommand {
                department_id,
                period: p,
                results: [(0, 1.0)].into_iter().collect(),
                indicators: Some(vec![KpiIndicator::new(
                    "Entregas",
                    7.0,
                    1.0,
                    IndicatorType::Accelerator,
                    GoalCondition::Above,
                )
                .unwrap()]),
            },
            admin(),
        )
        .await
        .unwrap()
        .assessment
        .unwrap()
        .id()
    }

    async fn kpi_score(env: &TestEnv, id: ReviewId) -> Option<f64> {
        ReviewRepository::find_by_id(env.store.as_ref(), &id)
            .await
            .unwrap()
            .unwrap()
            .kpi_score()
    }

    fn handler(env: &TestEnv) -> DeleteKpiAssessmentHandler {
        DeleteKpiAssessmentHandler::new(env.store.clone(), env.bus.clone())
    }

    #[tokio::test]
    async fn clears_scores_but_keeps_completion() {
        let env = TestEnv::new().await;
        let p = period("2024-06");
        let review = env.submitted_review(ANA, p, &[9, 9, 9]).await;
        let assessment_id = process(&env, env.sales.id(), p).await;

        let cleared = handler(&env)
            .handle(DeleteKpiAssessmentCommand { assessment_id }, admin())
            .await
            .unwrap();

        assert_eq!(cleared, 1);
        let stored = ReviewRepository::find_by_id(env.store.as_ref(), &review.id())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.kpi_score(), None);
        assert_eq!(stored.status(), ReviewStatus::Completed);
        assert!(KpiAssessmentRepository::find_by_id(env.store.as_ref(), &assessment_id)
            .await
            .unwrap()
            .is_none());
        assert!(env.bus.has_event("kpi.assessment_deleted.v1"));
    }

    #[tokio::test]
    async fn clears_exactly_the_reviews_of_department_and_period_at_deletion() {
        let env = TestEnv::new().await;
        let p = period("2024-06");
        let ana = env.open_review(ANA, p).await;
        let assessment_id = process(&env, env.sales.id(), p).await;

        let mut bruno = env.open_review(BRUNO, p).await;
        bruno.apply_kpi_score(3.0, Timestamp::now());
        env.store.update(&bruno).await.unwrap();
        let carla = env.open_review(CARLA, p).await;
        process(&env, env.ops.id(), p).await;
        let next_month = env.open_review(ANA, p.next()).await;
        process(&env, env.sales.id(), p.next()).await;

        let cleared = handler(&env)
            .handle(DeleteKpiAssessmentCommand { assessment_id }, admin())
            .await
            .unwrap();

        assert_eq!(cleared, 2);
        assert_eq!(kpi_score(&env, ana.id()).await, None);
        assert_eq!(kpi_score(&env, bruno.id()).await, None);
        assert_eq!(kpi_score(&env, carla.id()).await, Some(7.0));
        assert_eq!(kpi_score(&env, next_month.id()).await, Some(7.0));
    }

    #[tokio::test]
    async fn unknown_assessment_and_non_admins_are_rejected() {
        let env = TestEnv::new().await;
        let cmd = DeleteKpiAssessmentCommand {
            assessment_id: KpiAssessmentId::new(),
        };

        assert!(matches!(
            handler(&env).handle(cmd.clone(), admin()).await,
            Err(KpiError::AssessmentNotFound(_))
        ));
        assert_eq!(handler(&env).handle(cmd, manager()).await.unwrap_err(), KpiError::Forbidden);
    }
}
