//! ProcessKpiResultsHandler - Runs an "apuração" for a department and month.
//!
//! The score is written to every review of the department in the period and
//! reviews awaiting approval are completed. The review writes and the
//! assessment snapshot are committed together, against the reviews as they
//! are at commit time.

use std::sync::Arc;

use crate::domain::foundation::{CommandMetadata, DepartmentId, EventId, Period, Timestamp};
use crate::domain::kpi::{KpiAssessment, KpiError, KpiIndicator, KpiResults, KpiResultsProcessed};
use crate::ports::{EventPublisher, KpiAssessmentRepository, KpiModelRepository, OrgDirectory};

use super::super::publish_event;

/// Command to process measured KPI results.
#[derive(Debug, Clone)]
pub struct ProcessKpiResultsCommand {
    pub department_id: DepartmentId,
    pub period: Period,
    pub results: KpiResults,
    /// Overrides the department's stored model when given.
    pub indicators: Option<Vec<KpiIndicator>>,
}

/// Outcome of processing.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessKpiResultsResult {
    pub kpi_score: f64,
    pub success: bool,
    pub message: String,
    /// Zero when no review matched; nothing was saved then.
    pub reviews_affected_count: usize,
    pub reviews_completed: usize,
    pub assessment: Option<KpiAssessment>,
}

pub struct ProcessKpiResultsHandler {
    models: Arc<dyn KpiModelRepository>,
    assessments: Arc<dyn KpiAssessmentRepository>,
    directory: Arc<dyn OrgDirectory>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl ProcessKpiResultsHandler {
    pub fn new(
        models: Arc<dyn KpiModelRepository>,
        assessments: Arc<dyn KpiAssessmentRepository>,
        directory: Arc<dyn OrgDirectory>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            models,
            assessments,
            directory,
            event_publisher,
        }
    }

    pub async fn handle(
        &self,
        cmd: ProcessKpiResultsCommand,
        metadata: CommandMetadata,
    ) -> Result<ProcessKpiResultsResult, KpiError> {
        // 1. Authorize
        if !metadata.capabilities().process_kpi {
            return Err(KpiError::forbidden());
        }

        // 2. Resolve department and indicators
        let department = self
            .directory
            .find_department(&cmd.department_id)
            .await?
            .ok_or(KpiError::DepartmentNotFound(cmd.department_id))?;
        let indicators = match cmd.indicators {
            Some(indicators) => indicators
                .into_iter()
                .map(KpiIndicator::validated)
                .collect::<Result<Vec<_>, _>>()?,
            None => self
                .models
                .find_by_department(&cmd.department_id)
                .await?
                .ok_or(KpiError::ModelNotFound(cmd.department_id))?
                .indicators()
                .to_vec(),
        };
        if indicators.is_empty() {
            return Err(KpiError::validation("indicators", "At least one indicator is required"));
        }

        let mut assessment = KpiAssessment::assess(
            department.id(),
            department.name(),
            cmd.period,
            indicators,
            cmd.results,
        );
        let kpi_score = assessment.kpi_score();

        // 3. Commit snapshot and review scores together
        if let Some(previous) = self
            .assessments
            .find_by_department_and_period(&department.id(), cmd.period)
            .await?
        {
            assessment = assessment.superseding(&previous);
        }
        let now = Timestamp::now();
        let writes = self.assessments.commit_processing(&assessment, now).await?;

        if writes.affected == 0 {
            tracing::info!(
                department_id = %department.id(),
                period = %cmd.period,
                kpi_score,
                "KPI score computed without matching reviews"
            );
            return Ok(ProcessKpiResultsResult {
                kpi_score,
                success: true,
                message: format!(
                    "KPI score {:.2} computed but not saved: no reviews for {} in {}",
                    kpi_score,
                    department.name(),
                    cmd.period
                ),
                reviews_affected_count: 0,
                reviews_completed: 0,
                assessment: None,
            });
        }

        tracing::info!(
            assessment_id = %assessment.id(),
            department_id = %department.id(),
            period = %cmd.period,
            kpi_score,
            reviews = writes.affected,
            completed = writes.completed,
            "KPI results processed"
        );

        // 4. Publish event
        let event = KpiResultsProcessed {
            event_id: EventId::new(),
            assessment_id: assessment.id(),
            department_id: department.id(),
            period: cmd.period,
            kpi_score,
            reviews_affected: writes.affected,
            reviews_completed: writes.completed,
            processed_by: metadata.user_id().clone(),
            processed_at: now,
        };
        publish_event(self.event_publisher.as_ref(), &event, &metadata).await;

        Ok(ProcessKpiResultsResult {
            kpi_score,
            success: true,
            message: format!(
                "KPI score {:.2} applied to {} review(s), {} completed",
                kpi_score, writes.affected, writes.completed
            ),
            reviews_affected_count: writes.affected,
            reviews_completed: writes.completed,
            assessment: Some(assessment),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::*;
    use crate::domain::kpi::{GoalCondition, IndicatorType, KpiModel};
    use crate::domain::review::ReviewStatus;
    use crate::ports::ReviewRepository;

    fn handler(env: &TestEnv) -> ProcessKpiResultsHandler {
        ProcessKpiResultsHandler::new(
            env.store.clone(),
            env.store.clone(),
            env.store.clone(),
            env.bus.clone(),
        )
    }

    fn indicators() -> Vec<KpiIndicator> {
        vec![
            KpiIndicator::new("Faturamento", 6.0, 100.0, IndicatorType::Accelerator, GoalCondition::Above)
                .unwrap(),
            KpiIndicator::new("Reclamações", 2.0, 5.0, IndicatorType::Detractor, GoalCondition::Below)
                .unwrap(),
        ]
    }

    fn results(pairs: &[(usize, f64)]) -> KpiResults {
        pairs.iter().copied().collect()
    }

    fn command(env: &TestEnv, p: Period, pairs: &[(usize, f64)]) -> ProcessKpiResultsCommand {
        ProcessKpiResultsCommand {
            department_id: env.sales.id(),
            period: p,
            results: results(pairs),
            indicators: None,
        }
    }

    async fn with_model(env: &TestEnv) {
        env.store
            .save(&KpiModel::new(env.sales.id(), indicators()).unwrap())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn writes_score_and_completes_awaiting_reviews() {
        let env = TestEnv::new().await;
        with_model(&env).await;
        let p = period("2024-05");
        let submitted = env.submitted_review(ANA, p, &[8, 8, 8]).await;
        let pending = env.open_review(BRUNO, p).await;
        let other_dept = env.submitted_review(CARLA, p, &[5, 5, 5]).await;

        let result = handler(&env)
            .handle(command(&env, p, &[(0, 120.0), (1, 9.0)]), admin())
            .await
            .unwrap();

        assert_eq!(result.kpi_score, 4.0);
        assert!(result.success);
        assert_eq!(result.reviews_affected_count, 2);
        assert_eq!(result.reviews_completed, 1);

        let ana = ReviewRepository::find_by_id(env.store.as_ref(), &submitted.id()).await.unwrap().unwrap();
        assert_eq!(ana.status(), ReviewStatus::Completed);
        assert_eq!(ana.kpi_score(), Some(4.0));
        let bruno = ReviewRepository::find_by_id(env.store.as_ref(), &pending.id()).await.unwrap().unwrap();
        assert_eq!(bruno.status(), ReviewStatus::Pending);
        assert_eq!(bruno.kpi_score(), Some(4.0));
        let carla = ReviewRepository::find_by_id(env.store.as_ref(), &other_dept.id()).await.unwrap().unwrap();
        assert_eq!(carla.kpi_score(), None);

        assert!(env.bus.has_event("kpi.results_processed.v1"));
    }

    #[tokio::test]
    async fn reprocessing_replaces_the_snapshot() {
        let env = TestEnv::new().await;
        with_model(&env).await;
        let p = period("2024-05");
        env.open_review(ANA, p).await;

        let first = handler(&env)
            .handle(command(&env, p, &[(0, 120.0)]), admin())
            .await
            .unwrap();
        let second = handler(&env)
            .handle(command(&env, p, &[(0, 10.0), (1, 1.0)]), admin())
            .await
            .unwrap();

        assert_eq!(second.kpi_score, 0.0);
        assert_eq!(
            first.assessment.map(|a| a.id()),
            second.assessment.map(|a| a.id())
        );
        let stored = KpiAssessmentRepository::list(env.store.as_ref(), Some(p), None)
            .await
            .unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].kpi_score(), 0.0);
    }

    #[tokio::test]
    async fn without_reviews_score_is_returned_but_not_saved() {
        let env = TestEnv::new().await;
        with_model(&env).await;

        let result = handler(&env)
            .handle(command(&env, period("2024-05"), &[(0, 120.0), (1, 20.0)]), admin())
            .await
            .unwrap();

        assert_eq!(result.kpi_score, 4.0);
        assert!(result.success);
        assert!(result.assessment.is_none());
        assert_eq!(result.reviews_affected_count, 0);
        assert!(result.message.contains("not saved"));
        assert!(KpiAssessmentRepository::list(env.store.as_ref(), None, None)
            .await
            .unwrap()
            .is_empty());
        assert_eq!(env.bus.event_count(), 0);
    }

    #[tokio::test]
    async fn explicit_indicators_override_missing_model() {
        let env = TestEnv::new().await;
        let p = period("2024-05");
        env.open_review(ANA, p).await;

        let missing = handler(&env).handle(command(&env, p, &[]), admin()).await;
        assert!(matches!(missing, Err(KpiError::ModelNotFound(_))));

        let mut cmd = command(&env, p, &[(1, 2.0)]);
        cmd.indicators = Some(indicators());
        let result = handler(&env).handle(cmd, admin()).await.unwrap();
        assert_eq!(result.kpi_score, 0.0);
    }

    #[tokio::test]
    async fn only_administrators_process() {
        let env = TestEnv::new().await;
        let err = handler(&env)
            .handle(command(&env, period("2024-05"), &[]), manager())
            .await
            .unwrap_err();
        assert_eq!(err, KpiError::Forbidden);
    }
}
