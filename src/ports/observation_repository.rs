//! Observation repository port.
//!
//! Weekly observations hang off a review and are visible on its details page.
//! Diary entries are the manager's running notes about an employee, also
//! anchored to a review so that deleting the review removes them.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ObservationId, Period, ReviewId, UserId};
use crate::domain::review::{DiaryEntry, WeeklyObservation};

/// Diary query. `None` fields match everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DiaryFilter {
    /// Only entries created within this month.
    pub period: Option<Period>,
    pub employee_id: Option<UserId>,
    pub author_id: Option<UserId>,
}

impl DiaryFilter {
    pub fn matches(&self, entry: &DiaryEntry) -> bool {
        self.period
            .map_or(true, |p| p.contains(entry.created_at.as_datetime()))
            && self
                .employee_id
                .as_ref()
                .map_or(true, |e| e == &entry.employee_id)
            && self
                .author_id
                .as_ref()
                .map_or(true, |a| a == &entry.author_id)
    }
}

#[async_trait]
pub trait ObservationRepository: Send + Sync {
    async fn add_weekly(&self, observation: &WeeklyObservation) -> Result<(), DomainError>;

    async fn find_weekly(&self, id: &ObservationId) -> Result<Option<WeeklyObservation>, DomainError>;

    /// # Errors
    ///
    /// - `ObservationNotFound` if the observation doesn't exist
    async fn delete_weekly(&self, id: &ObservationId) -> Result<(), DomainError>;

    /// Observations of a review, newest first.
    async fn list_weekly(&self, review_id: &ReviewId) -> Result<Vec<WeeklyObservation>, DomainError>;

    async fn add_diary_entry(&self, entry: &DiaryEntry) -> Result<(), DomainError>;

    /// Diary entries matching `filter`, newest first.
    async fn list_diary(&self, filter: &DiaryFilter) -> Result<Vec<DiaryEntry>, DomainError>;
}
