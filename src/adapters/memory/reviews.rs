use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ErrorCode, Period, ReviewId, UserId};
use crate::domain::review::PerformanceReview;
use crate::ports::{ReviewFilter, ReviewRepository};

use super::InMemoryStore;

#[async_trait]
impl ReviewRepository for InMemoryStore {
    async fn insert_if_absent(&self, review: &PerformanceReview) -> Result<bool, DomainError> {
        let mut state = self.write()?;
        let exists = state
            .reviews
            .values()
            .any(|r| r.employee_id() == review.employee_id() && r.period() == review.period());
        if exists {
            return Ok(false);
        }
        state.reviews.insert(review.id(), review.clone());
        Ok(true)
    }

    async fn insert_all_if_absent(
        &self,
        reviews: &[PerformanceReview],
    ) -> Result<Vec<ReviewId>, DomainError> {
        let mut state = self.write()?;
        let mut inserted = Vec::new();
        for review in reviews {
            let exists = state
                .reviews
                .values()
                .any(|r| r.employee_id() == review.employee_id() && r.period() == review.period());
            if !exists {
                state.reviews.insert(review.id(), review.clone());
                inserted.push(review.id());
            }
        }
        Ok(inserted)
    }

    async fn update(&self, review: &PerformanceReview) -> Result<(), DomainError> {
        let mut state = self.write()?;
        match state.reviews.get_mut(&review.id()) {
            Some(existing) => {
                *existing = review.clone();
                Ok(())
            }
            None => Err(not_found(&review.id())),
        }
    }

    async fn find_by_id(&self, id: &ReviewId) -> Result<Option<PerformanceReview>, DomainError> {
        Ok(self.read()?.reviews.get(id).cloned())
    }

    async fn find(&self, filter: &ReviewFilter) -> Result<Vec<PerformanceReview>, DomainError> {
        let mut found: Vec<PerformanceReview> = self
            .read()?
            .reviews
            .values()
            .filter(|r| filter.matches(r))
            .cloned()
            .collect();
        found.sort_by_key(|r| r.created_at());
        Ok(found)
    }

    async fn find_for_employee(
        &self,
        employee_id: &UserId,
        period: Period,
    ) -> Result<Option<PerformanceReview>, DomainError> {
        Ok(self
            .read()?
            .reviews
            .values()
            .find(|r| r.employee_id() == employee_id && r.period() == period)
            .cloned())
    }

    async fn delete(&self, id: &ReviewId) -> Result<(), DomainError> {
        let mut state = self.write()?;
        if state.reviews.remove(id).is_none() {
            return Err(not_found(id));
        }
        state.weekly.retain(|o| &o.review_id != id);
        state.diary.retain(|d| &d.review_id != id);
        Ok(())
    }
}

fn not_found(id: &ReviewId) -> DomainError {
    DomainError::new(ErrorCode::ReviewNotFound, format!("Review not found: {}", id))
}
