//! ListDiaryHandler - Diary entries for a month.

use std::sync::Arc;

use crate::domain::foundation::{Actor, Period, UserId};
use crate::domain::review::{DiaryEntry, ReviewError};
use crate::ports::{DiaryFilter, ObservationRepository};

#[derive(Debug, Clone)]
pub struct ListDiaryQuery {
    pub actor: Actor,
    pub period: Period,
    pub employee_id: Option<UserId>,
}

pub struct ListDiaryHandler {
    observations: Arc<dyn ObservationRepository>,
}

impl ListDiaryHandler {
    pub fn new(observations: Arc<dyn ObservationRepository>) -> Self {
        Self { observations }
    }

    /// Newest first. Collaborators see nothing and managers see their own entries.
    pub async fn handle(&self, query: ListDiaryQuery) -> Result<Vec<DiaryEntry>, ReviewError> {
        let caps = query.actor.capabilities();
        if !caps.manage_team_reviews {
            return Ok(Vec::new());
        }

        let filter = DiaryFilter {
            period: Some(query.period),
            employee_id: query.employee_id,
            author_id: (!caps.view_all_reviews).then(|| query.actor.user_id.clone()),
        };
        Ok(self.observations.list_diary(&filter).await?)
    }
}
