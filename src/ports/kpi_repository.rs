//! KPI persistence ports.
//!
//! Processing and deleting an assessment touch the assessment row and every
//! review of its department and period. Both are exposed as a single commit
//! that patches the reviews as they are at commit time.

use async_trait::async_trait;

use crate::domain::foundation::{DepartmentId, DomainError, KpiAssessmentId, Period, Timestamp};
use crate::domain::kpi::{KpiAssessment, KpiModel};

/// Stores one KPI model per department.
#[async_trait]
pub trait KpiModelRepository: Send + Sync {
    /// Inserts or replaces the department's model.
    async fn save(&self, model: &KpiModel) -> Result<(), DomainError>;

    async fn find_by_department(
        &self,
        department_id: &DepartmentId,
    ) -> Result<Option<KpiModel>, DomainError>;

    async fn list(&self) -> Result<Vec<KpiModel>, DomainError>;
}

/// Stores KPI assessment snapshots, at most one per department and period.
#[async_trait]
pub trait KpiAssessmentRepository: Send + Sync {
    async fn find_by_id(&self, id: &KpiAssessmentId) -> Result<Option<KpiAssessment>, DomainError>;

    async fn find_by_department_and_period(
        &self,
        department_id: &DepartmentId,
        period: Period,
    ) -> Result<Option<KpiAssessment>, DomainError>;

    /// Snapshots, newest period first, optionally narrowed.
    async fn list(
        &self,
        period: Option<Period>,
        department_id: Option<DepartmentId>,
    ) -> Result<Vec<KpiAssessment>, DomainError>;

    /// Upserts `assessment` by department and period and writes its score to
    /// the reviews of that department and period, in one unit.
    ///
    /// Reviews are matched and patched at commit time: only `kpi_score` is
    /// written, and reviews awaiting approval at that moment are completed at
    /// `now`. When no review matches, nothing is stored.
    async fn commit_processing(
        &self,
        assessment: &KpiAssessment,
        now: Timestamp,
    ) -> Result<KpiReviewWrites, DomainError>;

    /// Deletes the assessment and clears `kpi_score` on every review of its
    /// department and period, in one unit. Returns the number of reviews cleared.
    ///
    /// # Errors
    ///
    /// - `AssessmentNotFound` if the assessment doesn't exist
    async fn commit_deletion(&self, id: &KpiAssessmentId) -> Result<usize, DomainError>;
}

/// Review rows touched by [`KpiAssessmentRepository::commit_processing`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KpiReviewWrites {
    pub affected: usize,
    pub completed: usize,
}
