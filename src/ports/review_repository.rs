//! Review repository port.
//!
//! Persists `PerformanceReview` aggregates. The store enforces one review per
//! employee per period.

use async_trait::async_trait;

use crate::domain::foundation::{DepartmentId, DomainError, Period, ReviewId, UserId};
use crate::domain::review::{PerformanceReview, ReviewStatus};

/// Conjunctive filter over stored reviews. `None` fields match everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReviewFilter {
    /// Restrict to these employees. An empty list matches nothing.
    pub employee_ids: Option<Vec<UserId>>,
    pub manager_id: Option<UserId>,
    pub department_id: Option<DepartmentId>,
    pub period: Option<Period>,
    pub status: Option<ReviewStatus>,
}

impl ReviewFilter {
    pub fn for_period(period: Period) -> Self {
        Self {
            period: Some(period),
            ..Self::default()
        }
    }

    pub fn with_department(mut self, department_id: DepartmentId) -> Self {
        self.department_id = Some(department_id);
        self
    }

    pub fn with_manager(mut self, manager_id: UserId) -> Self {
        self.manager_id = Some(manager_id);
        self
    }

    pub fn with_employees(mut self, employee_ids: Vec<UserId>) -> Self {
        self.employee_ids = Some(employee_ids);
        self
    }

    pub fn with_status(mut self, status: ReviewStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// True when `review` satisfies every set criterion.
    pub fn matches(&self, review: &PerformanceReview) -> bool {
        self.employee_ids
            .as_ref()
            .map_or(true, |ids| ids.contains(review.employee_id()))
            && self
                .manager_id
                .as_ref()
                .map_or(true, |m| m == review.manager_id())
            && self
                .department_id
                .map_or(true, |d| review.department_id() == Some(d))
            && self.period.map_or(true, |p| review.period() == p)
            && self.status.map_or(true, |s| review.status() == s)
    }
}

/// Repository port for performance reviews.
#[async_trait]
pub trait ReviewRepository: Send + Sync {
    /// Inserts `review` unless one already exists for the same employee and period.
    ///
    /// Returns `false` when the review was skipped.
    async fn insert_if_absent(&self, review: &PerformanceReview) -> Result<bool, DomainError>;

    /// Batch form of [`ReviewRepository::insert_if_absent`], committed as one unit.
    ///
    /// Returns the ids of the reviews actually inserted.
    async fn insert_all_if_absent(
        &self,
        reviews: &[PerformanceReview],
    ) -> Result<Vec<ReviewId>, DomainError>;

    /// Overwrites an existing review.
    ///
    /// # Errors
    ///
    /// - `ReviewNotFound` if the review doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn update(&self, review: &PerformanceReview) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &ReviewId) -> Result<Option<PerformanceReview>, DomainError>;

    /// Reviews matching `filter`, in no particular order.
    async fn find(&self, filter: &ReviewFilter) -> Result<Vec<PerformanceReview>, DomainError>;

    /// The review of `employee_id` for `period`, if any.
    async fn find_for_employee(
        &self,
        employee_id: &UserId,
        period: Period,
    ) -> Result<Option<PerformanceReview>, DomainError>;

    /// Deletes a review together with its weekly observations and diary entries.
    ///
    /// # Errors
    ///
    /// - `ReviewNotFound` if the review doesn't exist
    async fn delete(&self, id: &ReviewId) -> Result<(), DomainError>;
}
