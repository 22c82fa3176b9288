//! AddObservationForUserHandler - Writes a diary entry about an employee.
//!
//! The entry is filed under the employee's current-period review. When the
//! employee has no review yet, one is opened with the caller's first assigned
//! template.

use std::sync::Arc;

use crate::domain::foundation::{CommandMetadata, EventId, Period, Timestamp, UserId};
use crate::domain::review::{
    DiaryEntry, PerformanceReview, ReviewError, ReviewSubject, ReviewsCreated,
};
use crate::ports::{
    EventPublisher, ObservationRepository, OrgDirectory, ReviewRepository, TemplateRepository,
};

use super::super::publish_event;

#[derive(Debug, Clone)]
pub struct AddObservationForUserCommand {
    pub employee_id: UserId,
    pub text: String,
}

pub struct AddObservationForUserHandler {
    reviews: Arc<dyn ReviewRepository>,
    templates: Arc<dyn TemplateRepository>,
    observations: Arc<dyn ObservationRepository>,
    directory: Arc<dyn OrgDirectory>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl AddObservationForUserHandler {
    pub fn new(
        reviews: Arc<dyn ReviewRepository>,
        templates: Arc<dyn TemplateRepository>,
        observations: Arc<dyn ObservationRepository>,
        directory: Arc<dyn OrgDirectory>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            reviews,
            templates,
            observations,
            directory,
            event_publisher,
        }
    }

    pub async fn handle(
        &self,
        cmd: AddObservationForUserCommand,
        metadata: CommandMetadata,
    ) -> Result<DiaryEntry, ReviewError> {
        // 1. Authorize
        let actor = &metadata.actor;
        if !actor.capabilities().manage_team_reviews {
            return Err(ReviewError::forbidden());
        }
        if cmd.text.trim().is_empty() {
            return Err(ReviewError::validation("text", "Observation text is required"));
        }

        let chart = self.directory.org_chart().await?;
        let employee = chart
            .employee(&cmd.employee_id)
            .ok_or_else(|| ReviewError::EmployeeNotFound(cmd.employee_id.clone()))?;
        if !actor.capabilities().view_all_reviews
            && !chart.team_of(&actor.user_id).iter().any(|m| m.id == employee.id)
        {
            return Err(ReviewError::forbidden());
        }
        let author_name = chart
            .employee(&actor.user_id)
            .map(|e| e.name.clone())
            .unwrap_or_else(|| actor.user_id.to_string());

        // 2. Find or open the current review
        let period = Period::current();
        let review = match self.reviews.find_for_employee(&employee.id, period).await? {
            Some(review) => review,
            None => {
                let template = self
                    .templates
                    .assigned_to(&actor.user_id)
                    .await?
                    .into_iter()
                    .next()
                    .ok_or_else(|| {
                        ReviewError::validation(
                            "template",
                            "No template is assigned to you, so a review cannot be opened",
                        )
                    })?;
                let department = employee.department_id.and_then(|d| chart.department(&d));
                let review = PerformanceReview::open(
                    ReviewSubject {
                        employee_id: employee.id.clone(),
                        employee_name: employee.name.clone(),
                        employee_role: employee.role,
                        department_id: department.map(|d| d.id()),
                        department_name: department.map(|d| d.name().to_string()),
                        manager_id: actor.user_id.clone(),
                    },
                    template.id(),
                    template.name(),
                    period,
                );
                self.open_review(review, &metadata).await?
            }
        };

        // 3. Append the entry
        let entry = DiaryEntry::new(
            review.id(),
            &cmd.text,
            (employee.id.clone(), employee.name.clone()),
            (actor.user_id.clone(), author_name),
        )?;
        self.observations.add_diary_entry(&entry).await?;
        Ok(entry)
    }

    /// Stores `review`, or returns the one a concurrent request stored first.
    async fn open_review(
        &self,
        review: PerformanceReview,
        metadata: &CommandMetadata,
    ) -> Result<PerformanceReview, ReviewError> {
        if !self.reviews.insert_if_absent(&review).await? {
            return self
                .reviews
                .find_for_employee(review.employee_id(), review.period())
                .await?
                .ok_or_else(|| ReviewError::infrastructure("review vanished after conflict"));
        }

        tracing::info!(review_id = %review.id(), employee_id = %review.employee_id(), "review opened for diary entry");
        let event = ReviewsCreated {
            event_id: EventId::new(),
            created_by: metadata.user_id().clone(),
            period: review.period(),
            review_ids: vec![review.id()],
            skipped: 0,
            created_at: Timestamp::now(),
        };
        publish_event(self.event_publisher.as_ref(), &event, metadata).await;
        Ok(review)
    }
}
