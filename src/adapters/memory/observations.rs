use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ErrorCode, ObservationId, ReviewId};
use crate::domain::review::{DiaryEntry, WeeklyObservation};
use crate::ports::{DiaryFilter, ObservationRepository};

use super::InMemoryStore;

#[async_trait]
impl ObservationRepository for InMemoryStore {
    async fn add_weekly(&self, observation: &WeeklyObservation) -> Result<(), DomainError> {
        self.write()?.weekly.push(observation.clone());
        Ok(())
    }

    async fn find_weekly(&self, id: &ObservationId) -> Result<Option<WeeklyObservation>, DomainError> {
        Ok(self.read()?.weekly.iter().find(|o| &o.id == id).cloned())
    }

    async fn delete_weekly(&self, id: &ObservationId) -> Result<(), DomainError> {
        let mut state = self.write()?;
        let before = state.weekly.len();
        state.weekly.retain(|o| &o.id != id);
        if state.weekly.len() == before {
            return Err(DomainError::new(
                ErrorCode::ObservationNotFound,
                format!("Observation not found: {}", id),
            ));
        }
        Ok(())
    }

    async fn list_weekly(&self, review_id: &ReviewId) -> Result<Vec<WeeklyObservation>, DomainError> {
        let mut found: Vec<WeeklyObservation> = self
            .read()?
            .weekly
            .iter()
            .filter(|o| &o.review_id == review_id)
            .cloned()
            .collect();
        found.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(found)
    }

    async fn add_diary_entry(&self, entry: &DiaryEntry) -> Result<(), DomainError> {
        self.write()?.diary.push(entry.clone());
        Ok(())
    }

    async fn list_diary(&self, filter: &DiaryFilter) -> Result<Vec<DiaryEntry>, DomainError> {
        let mut found: Vec<DiaryEntry> = self
            .read()?
            .diary
            .iter()
            .filter(|d| filter.matches(d))
            .cloned()
            .collect();
        found.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(found)
    }
}
