use async_trait::async_trait;

use crate::domain::foundation::{
    DepartmentId, DomainError, ErrorCode, KpiAssessmentId, Period, Timestamp,
};
use crate::domain::kpi::{KpiAssessment, KpiModel};
use crate::ports::{KpiAssessmentRepository, KpiModelRepository, KpiReviewWrites, ReviewFilter};

use super::InMemoryStore;

#[async_trait]
impl KpiModelRepository for InMemoryStore {
    async fn save(&self, model: &KpiModel) -> Result<(), DomainError> {
        self.write()?
            .kpi_models
            .insert(model.department_id(), model.clone());
        Ok(())
    }

    async fn find_by_department(
        &self,
        department_id: &DepartmentId,
    ) -> Result<Option<KpiModel>, DomainError> {
        Ok(self.read()?.kpi_models.get(department_id).cloned())
    }

    async fn list(&self) -> Result<Vec<KpiModel>, DomainError> {
        let mut models: Vec<KpiModel> = self.read()?.kpi_models.values().cloned().collect();
        models.sort_by_key(|m| m.updated_at());
        Ok(models)
    }
}

#[async_trait]
impl KpiAssessmentRepository for InMemoryStore {
    async fn find_by_id(&self, id: &KpiAssessmentId) -> Result<Option<KpiAssessment>, DomainError> {
        Ok(self.read()?.assessments.get(id).cloned())
    }

    async fn find_by_department_and_period(
        &self,
        department_id: &DepartmentId,
        period: Period,
    ) -> Result<Option<KpiAssessment>, DomainError> {
        Ok(self
            .read()?
            .assessments
            .values()
            .find(|a| &a.department_id() == department_id && a.period() == period)
            .cloned())
    }

    async fn list(
        &self,
        period: Option<Period>,
        department_id: Option<DepartmentId>,
    ) -> Result<Vec<KpiAssessment>, DomainError> {
        let mut found: Vec<KpiAssessment> = self
            .read()?
            .assessments
            .values()
            .filter(|a| period.map_or(true, |p| a.period() == p))
            .filter(|a| department_id.map_or(true, |d| a.department_id() == d))
            .cloned()
            .collect();
        found.sort_by(|a, b| {
            b.period()
                .cmp(&a.period())
                .then_with(|| a.department_name().cmp(b.department_name()))
        });
        Ok(found)
    }

    async fn commit_processing(
        &self,
        assessment: &KpiAssessment,
        now: Timestamp,
    ) -> Result<KpiReviewWrites, DomainError> {
        let mut state = self.write()?;
        let filter = ReviewFilter::for_period(assessment.period())
            .with_department(assessment.department_id());

        let mut writes = KpiReviewWrites::default();
        for review in state.reviews.values_mut().filter(|r| filter.matches(r)) {
            writes.affected += 1;
            if review.apply_kpi_score(assessment.kpi_score(), now) {
                writes.completed += 1;
            }
        }
        if writes.affected == 0 {
            return Ok(writes);
        }

        state.assessments.retain(|_, a| {
            !(a.department_id() == assessment.department_id() && a.period() == assessment.period())
        });
        state.assessments.insert(assessment.id(), assessment.clone());
        Ok(writes)
    }

    async fn commit_deletion(&self, id: &KpiAssessmentId) -> Result<usize, DomainError> {
        let mut state = self.write()?;
        let assessment = state.assessments.remove(id).ok_or_else(|| {
            DomainError::new(
                ErrorCode::AssessmentNotFound,
                format!("KPI assessment not found: {}", id),
            )
        })?;

        let filter = ReviewFilter::for_period(assessment.period())
            .with_department(assessment.department_id());
        let mut cleared = 0;
        for review in state.reviews.values_mut().filter(|r| filter.matches(r)) {
            review.retract_kpi_score();
            cleared += 1;
        }
        Ok(cleared)
    }
}
