//! CreateReviewsHandler - Opens current-period reviews for a set of employees.

use std::sync::Arc;

use crate::domain::foundation::{CommandMetadata, EventId, Period, TemplateId, Timestamp, UserId};
use crate::domain::review::{PerformanceReview, ReviewError, ReviewSubject, ReviewsCreated};
use crate::ports::{EventPublisher, OrgDirectory, ReviewRepository, TemplateRepository};

use super::super::publish_event;

/// Command to open reviews for the current period.
#[derive(Debug, Clone)]
pub struct CreateReviewsCommand {
    pub employee_ids: Vec<UserId>,
    pub template_id: TemplateId,
}

/// Result of review creation.
#[derive(Debug, Clone)]
pub struct CreateReviewsResult {
    pub period: Period,
    pub created: Vec<PerformanceReview>,
    pub skipped_count: usize,
    pub message: String,
}

impl CreateReviewsResult {
    pub fn created_count(&self) -> usize {
        self.created.len()
    }
}

/// Handler for opening reviews.
pub struct CreateReviewsHandler {
    reviews: Arc<dyn ReviewRepository>,
    templates: Arc<dyn TemplateRepository>,
    directory: Arc<dyn OrgDirectory>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl CreateReviewsHandler {
    pub fn new(
        reviews: Arc<dyn ReviewRepository>,
        templates: Arc<dyn TemplateRepository>,
        directory: Arc<dyn OrgDirectory>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            reviews,
            templates,
            directory,
            event_publisher,
        }
    }

    pub async fn handle(
        &self,
        cmd: CreateReviewsCommand,
        metadata: CommandMetadata,
    ) -> Result<CreateReviewsResult, ReviewError> {
        // 1. Authorize
        let actor = &metadata.actor;
        if !actor.capabilities().manage_team_reviews {
            return Err(ReviewError::forbidden());
        }
        if cmd.employee_ids.is_empty() {
            return Err(ReviewError::validation(
                "employee_ids",
                "Select at least one employee",
            ));
        }

        // 2. Resolve template and people
        let template = self
            .templates
            .find_by_id(&cmd.template_id)
            .await?
            .ok_or(ReviewError::TemplateNotFound(cmd.template_id))?;
        let chart = self.directory.org_chart().await?;
        let team = chart.team_of(&actor.user_id);
        let period = Period::current();

        let mut candidates = Vec::with_capacity(cmd.employee_ids.len());
        for employee_id in &cmd.employee_ids {
            let employee = chart
                .employee(employee_id)
                .ok_or_else(|| ReviewError::EmployeeNotFound(employee_id.clone()))?;
            if !actor.capabilities().view_all_reviews && !team.iter().any(|m| m.id == employee.id) {
                return Err(ReviewError::forbidden());
            }
            let department = employee.department_id.and_then(|d| chart.department(&d));
            candidates.push(PerformanceReview::open(
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
            ));
        }

        // 3. Persist, skipping people who already have a review this period
        let inserted = self.reviews.insert_all_if_absent(&candidates).await?;
        let skipped_count = candidates.len() - inserted.len();
        let created: Vec<PerformanceReview> = candidates
            .into_iter()
            .filter(|r| inserted.contains(&r.id()))
            .collect();

        tracing::info!(
            period = %period,
            created = created.len(),
            skipped = skipped_count,
            "reviews created"
        );

        // 4. Publish event
        if !created.is_empty() {
            let event = ReviewsCreated {
                event_id: EventId::new(),
                created_by: actor.user_id.clone(),
                period,
                review_ids: inserted,
                skipped: skipped_count,
                created_at: Timestamp::now(),
            };
            publish_event(self.event_publisher.as_ref(), &event, &metadata).await;
        }

        let message = format!(
            "{} review(s) created, {} skipped because they already exist for {}",
            created.len(),
            skipped_count,
            period
        );
        Ok(CreateReviewsResult {
            period,
            created,
            skipped_count,
            message,
        })
    }
}
