//! Request and response bodies for review endpoints.

use serde::{Deserialize, Serialize};

use crate::application::handlers::review::{CreateReviewsResult, PreviousReview, ReviewDetails};
use crate::domain::foundation::{
    DepartmentId, ObservationId, Period, ReviewId, Role, TemplateId, Timestamp, UserId,
};
use crate::domain::review::{ItemScores, PerformanceReview, ReviewStatus, WeeklyObservation};

// ════════════════════════════════════════════════════════════════════════════
// Requests
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Deserialize)]
pub struct CreateReviewsRequest {
    pub employee_ids: Vec<UserId>,
    pub template_id: TemplateId,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SubmitReviewRequest {
    pub scores: ItemScores,
    pub feedback_for_employee: String,
    #[serde(default)]
    pub manager_observations: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RequestAdjustmentRequest {
    pub feedback_for_manager: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FeedbackDraftRequest {
    #[serde(default)]
    pub scores: ItemScores,
    #[serde(default)]
    pub manager_observations: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AddObservationRequest {
    pub text: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListReviewsParams {
    pub period: Option<String>,
    pub department_id: Option<String>,
}

// ════════════════════════════════════════════════════════════════════════════
// Responses
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize)]
pub struct ReviewResponse {
    pub id: ReviewId,
    pub employee_id: UserId,
    pub employee_name: String,
    pub employee_role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department_id: Option<DepartmentId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department_name: Option<String>,
    pub manager_id: UserId,
    pub template_id: TemplateId,
    pub template_name: String,
    pub period: Period,
    pub status: ReviewStatus,
    pub status_label: &'static str,
    pub scores: ItemScores,
    pub average_score: Option<f64>,
    pub kpi_score: Option<f64>,
    pub manager_observations: Option<String>,
    pub feedback_for_employee: Option<String>,
    pub admin_feedback_for_manager: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub completed_at: Option<Timestamp>,
}

impl From<&PerformanceReview> for ReviewResponse {
    fn from(review: &PerformanceReview) -> Self {
        let subject = review.subject();
        Self {
            id: review.id(),
            employee_id: subject.employee_id.clone(),
            employee_name: subject.employee_name.clone(),
            employee_role: subject.employee_role,
            department_id: subject.department_id,
            department_name: subject.department_name.clone(),
            manager_id: subject.manager_id.clone(),
            template_id: review.template_id(),
            template_name: review.template_name().to_string(),
            period: review.period(),
            status: review.status(),
            status_label: review.status().label(),
            scores: review.scores().clone(),
            average_score: review.average_score(),
            kpi_score: review.kpi_score(),
            manager_observations: review.manager_observations().map(str::to_string),
            feedback_for_employee: review.feedback_for_employee().map(str::to_string),
            admin_feedback_for_manager: review.admin_feedback_for_manager().map(str::to_string),
            created_at: review.created_at(),
            updated_at: review.updated_at(),
            completed_at: review.completed_at(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ObservationResponse {
    pub id: ObservationId,
    pub text: String,
    pub author_id: UserId,
    pub created_at: Timestamp,
}

impl From<WeeklyObservation> for ObservationResponse {
    fn from(observation: WeeklyObservation) -> Self {
        Self {
            id: observation.id,
            text: observation.text,
            author_id: observation.author_id,
            created_at: observation.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ReviewDetailsResponse {
    pub review: ReviewResponse,
    /// Item texts in scoring order; empty when the template was deleted.
    pub items: Vec<String>,
    pub observations: Vec<ObservationResponse>,
    pub previous: Option<PreviousReview>,
}

impl From<ReviewDetails> for ReviewDetailsResponse {
    fn from(details: ReviewDetails) -> Self {
        Self {
            review: ReviewResponse::from(&details.review),
            items: details
                .template
                .map(|t| t.items().iter().map(|i| i.text.clone()).collect())
                .unwrap_or_default(),
            observations: details.observations.into_iter().map(Into::into).collect(),
            previous: details.previous,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateReviewsResponse {
    pub period: Period,
    pub created_count: usize,
    pub skipped_count: usize,
    pub message: String,
    pub review_ids: Vec<ReviewId>,
}

impl From<CreateReviewsResult> for CreateReviewsResponse {
    fn from(result: CreateReviewsResult) -> Self {
        Self {
            period: result.period,
            created_count: result.created_count(),
            skipped_count: result.skipped_count,
            message: result.message,
            review_ids: result.created.iter().map(|r| r.id()).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ReviewCommandResponse {
    pub success: bool,
    pub message: String,
    pub review: ReviewResponse,
}

#[derive(Debug, Clone, Serialize)]
pub struct FeedbackDraftResponse {
    pub feedback: String,
}
