//! PerformanceReview aggregate.
//!
//! One review exists per employee per period. The manager scores each item of
//! the review's template and writes feedback; an administrator approves or
//! sends it back. The department's KPI score is written separately by the KPI
//! processing batch, which may also complete a review that is awaiting
//! approval.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    Actor, DepartmentId, DomainError, ErrorCode, Period, ReviewId, Role, StateMachine,
    TemplateId, Timestamp, UserId, ValidationError,
};

use super::{ItemScores, ReviewStatus};

/// Minimum length of the feedback written for the employee on submission.
pub const FEEDBACK_MIN_CHARS: usize = 20;

/// Minimum length of the administrator's adjustment request.
pub const ADJUSTMENT_FEEDBACK_MIN_CHARS: usize = 10;

/// Who a review is about and who is responsible for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewSubject {
    pub employee_id: UserId,
    pub employee_name: String,
    pub employee_role: Role,
    pub department_id: Option<DepartmentId>,
    pub department_name: Option<String>,
    pub manager_id: UserId,
}

/// The manager's scores and texts for a submission.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewSubmission {
    pub scores: ItemScores,
    pub feedback_for_employee: String,
    pub manager_observations: Option<String>,
}

/// Performance review aggregate.
///
/// # Invariants
///
/// - `average_score` is only written by [`PerformanceReview::submit`]
/// - `kpi_score` is only written by the KPI batch and cleared when its assessment is deleted
/// - a `Completed` review never accepts submit, adjustment or approval
/// - `completed_at` is set exactly when the status becomes `Completed`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceReview {
    id: ReviewId,
    subject: ReviewSubject,
    template_id: TemplateId,
    template_name: String,
    period: Period,
    status: ReviewStatus,
    scores: ItemScores,
    average_score: Option<f64>,
    kpi_score: Option<f64>,
    manager_observations: Option<String>,
    feedback_for_employee: Option<String>,
    admin_feedback_for_manager: Option<String>,
    created_at: Timestamp,
    updated_at: Timestamp,
    completed_at: Option<Timestamp>,
}

impl PerformanceReview {
    /// Opens a pending review for `subject` in `period`.
    pub fn open(
        subject: ReviewSubject,
        template_id: TemplateId,
        template_name: impl Into<String>,
        period: Period,
    ) -> Self {
        let now = Timestamp::now();
        Self {
            id: ReviewId::new(),
            subject,
            template_id,
            template_name: template_name.into(),
            period,
            status: ReviewStatus::Pending,
            scores: ItemScores::new(),
            average_score: None,
            kpi_score: None,
            manager_observations: None,
            feedback_for_employee: None,
            admin_feedback_for_manager: None,
            created_at: now,
            updated_at: now,
            completed_at: None,
        }
    }

    /// Reconstitutes a review from persistence (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: ReviewId,
        subject: ReviewSubject,
        template_id: TemplateId,
        template_name: String,
        period: Period,
        status: ReviewStatus,
        scores: ItemScores,
        average_score: Option<f64>,
        kpi_score: Option<f64>,
        manager_observations: Option<String>,
        feedback_for_employee: Option<String>,
        admin_feedback_for_manager: Option<String>,
        created_at: Timestamp,
        updated_at: Timestamp,
        completed_at: Option<Timestamp>,
    ) -> Self {
        Self {
            id,
            subject,
            template_id,
            template_name,
            period,
            status,
            scores,
            average_score,
            kpi_score,
            manager_observations,
            feedback_for_employee,
            admin_feedback_for_manager,
            created_at,
            updated_at,
            completed_at,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> ReviewId {
        self.id
    }

    pub fn subject(&self) -> &ReviewSubject {
        &self.subject
    }

    pub fn employee_id(&self) -> &UserId {
        &self.subject.employee_id
    }

    pub fn employee_name(&self) -> &str {
        &self.subject.employee_name
    }

    pub fn manager_id(&self) -> &UserId {
        &self.subject.manager_id
    }

    pub fn department_id(&self) -> Option<DepartmentId> {
        self.subject.department_id
    }

    pub fn template_id(&self) -> TemplateId {
        self.template_id
    }

    pub fn template_name(&self) -> &str {
        &self.template_name
    }

    pub fn period(&self) -> Period {
        self.period
    }

    pub fn status(&self) -> ReviewStatus {
        self.status
    }

    pub fn is_completed(&self) -> bool {
        self.status == ReviewStatus::Completed
    }

    pub fn scores(&self) -> &ItemScores {
        &self.scores
    }

    pub fn average_score(&self) -> Option<f64> {
        self.average_score
    }

    pub fn kpi_score(&self) -> Option<f64> {
        self.kpi_score
    }

    pub fn manager_observations(&self) -> Option<&str> {
        self.manager_observations.as_deref()
    }

    pub fn feedback_for_employee(&self) -> Option<&str> {
        self.feedback_for_employee.as_deref()
    }

    pub fn admin_feedback_for_manager(&self) -> Option<&str> {
        self.admin_feedback_for_manager.as_deref()
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    pub fn completed_at(&self) -> Option<Timestamp> {
        self.completed_at
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Authorization
    // ─────────────────────────────────────────────────────────────────────────

    /// The responsible manager or an administrator.
    pub fn authorize_manage(&self, actor: &Actor) -> Result<(), DomainError> {
        if actor.capabilities().manage_team_reviews && actor.is_self_or_admin(self.manager_id()) {
            return Ok(());
        }
        Err(DomainError::new(
            ErrorCode::Forbidden,
            "Only the responsible manager can change this review",
        ))
    }

    /// The employee, the responsible manager or an administrator.
    pub fn authorize_view(&self, actor: &Actor) -> Result<(), DomainError> {
        if &actor.user_id == self.employee_id() || actor.is_self_or_admin(self.manager_id()) {
            return Ok(());
        }
        Err(DomainError::new(
            ErrorCode::Forbidden,
            "You do not have access to this review",
        ))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Lifecycle
    // ─────────────────────────────────────────────────────────────────────────

    /// Submits (or resubmits) the review for approval and returns the frozen average.
    ///
    /// # Errors
    ///
    /// - `ReviewCompleted` if the review is already completed
    /// - `InvalidStateTransition` if it is already awaiting approval
    /// - `ValidationFailed` for short feedback or incomplete scores
    pub fn submit(
        &mut self,
        submission: ReviewSubmission,
        template_item_count: usize,
    ) -> Result<f64, DomainError> {
        self.ensure_transition(ReviewStatus::AwaitingApproval)?;

        let feedback = ValidationError::require_min_chars(
            "feedback_for_employee",
            &submission.feedback_for_employee,
            FEEDBACK_MIN_CHARS,
        )?;
        submission.scores.ensure_complete(template_item_count)?;

        let average = submission.scores.average();
        self.scores = submission.scores;
        self.average_score = Some(average);
        self.feedback_for_employee = Some(feedback);
        self.manager_observations = submission
            .manager_observations
            .map(|o| o.trim().to_string())
            .filter(|o| !o.is_empty());
        self.admin_feedback_for_manager = None;
        self.status = ReviewStatus::AwaitingApproval;
        self.updated_at = Timestamp::now();
        Ok(average)
    }

    /// Sends a submitted review back to the manager with the given feedback.
    pub fn request_adjustment(&mut self, feedback: &str) -> Result<(), DomainError> {
        self.ensure_transition(ReviewStatus::AdjustmentRequested)?;
        let feedback = ValidationError::require_min_chars(
            "admin_feedback_for_manager",
            feedback,
            ADJUSTMENT_FEEDBACK_MIN_CHARS,
        )?;
        self.admin_feedback_for_manager = Some(feedback);
        self.status = ReviewStatus::AdjustmentRequested;
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Approves a submitted review.
    pub fn approve(&mut self, now: Timestamp) -> Result<(), DomainError> {
        self.ensure_transition(ReviewStatus::Completed)?;
        self.complete(now);
        Ok(())
    }

    /// Writes the department KPI score.
    ///
    /// A review awaiting approval is completed as a side effect. Returns true
    /// when that happened.
    pub fn apply_kpi_score(&mut self, kpi_score: f64, now: Timestamp) -> bool {
        self.kpi_score = Some(kpi_score);
        self.updated_at = now;
        if self.status == ReviewStatus::AwaitingApproval {
            self.complete(now);
            return true;
        }
        false
    }

    /// Clears the KPI score. The status is left as is.
    pub fn retract_kpi_score(&mut self) {
        self.kpi_score = None;
        self.updated_at = Timestamp::now();
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Helpers
    // ─────────────────────────────────────────────────────────────────────────

    fn complete(&mut self, now: Timestamp) {
        self.status = ReviewStatus::Completed;
        self.completed_at = Some(now);
        self.updated_at = now;
    }

    fn ensure_transition(&self, target: ReviewStatus) -> Result<(), DomainError> {
        if self.status.is_terminal() {
            return Err(DomainError::new(
                ErrorCode::ReviewCompleted,
                "Review is already completed",
            ));
        }
        self.status.transition_to(target).map_err(|_| {
            DomainError::new(
                ErrorCode::InvalidStateTransition,
                format!(
                    "Cannot move review from '{}' to '{}'",
                    self.status.label(),
                    target.label()
                ),
            )
        })?;
        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;

    fn admin() -> Actor {
        Actor::new(UserId::new("admin").unwrap(), Role::Administrator)
    }

    #[test]
    fn new_review_is_pending_without_scores() {
        let review = pending_review("2024-05");
        assert_eq!(review.status(), ReviewStatus::Pending);
        assert!(review.average_score().is_none());
        assert!(review.kpi_score().is_none());
        assert!(review.completed_at().is_none());
    }

    #[test]
    fn submit_freezes_average_and_moves_to_awaiting_approval() {
        let mut review = pending_review("2024-05");
        let avg = review.submit(submission(&[8, 6, 10]), 3).unwrap();
        assert_eq!(avg, 8.0);
        assert_eq!(review.average_score(), Some(8.0));
        assert_eq!(review.status(), ReviewStatus::AwaitingApproval);
        assert_eq!(review.manager_observations(), Some("Acompanhar metas de vendas"));
    }

    #[test]
    fn submit_rejects_short_feedback() {
        let mut review = pending_review("2024-05");
        let mut sub = submission(&[5]);
        sub.feedback_for_employee = "curto demais".to_string();
        let err = review.submit(sub, 1).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert_eq!(err.field(), Some("feedback_for_employee"));
        assert_eq!(review.status(), ReviewStatus::Pending);
    }

    #[test]
    fn submit_rejects_incomplete_scores() {
        let mut review = pending_review("2024-05");
        let err = review.submit(submission(&[5, 5]), 3).unwrap_err();
        assert_eq!(err.field(), Some("scores"));
        assert!(review.average_score().is_none());
    }

    #[test]
    fn submit_twice_without_adjustment_is_rejected() {
        let mut review = pending_review("2024-05");
        review.submit(submission(&[5]), 1).unwrap();
        let err = review.submit(submission(&[9]), 1).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidStateTransition);
        assert_eq!(review.average_score(), Some(5.0));
    }

    #[test]
    fn completed_review_never_accepts_submit() {
        let mut review = pending_review("2024-05");
        review.submit(submission(&[5]), 1).unwrap();
        review.approve(Timestamp::now()).unwrap();
        let err = review.submit(submission(&[9]), 1).unwrap_err();
        assert_eq!(err.code, ErrorCode::ReviewCompleted);
        assert!(review.request_adjustment("Refazer a avaliação").is_err());
        assert!(review.approve(Timestamp::now()).is_err());
    }

    #[test]
    fn pending_review_cannot_be_approved() {
        let mut review = pending_review("2024-05");
        let err = review.approve(Timestamp::now()).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidStateTransition);
        assert!(review.completed_at().is_none());
    }

    #[test]
    fn adjustment_requires_ten_characters() {
        let mut review = pending_review("2024-05");
        review.submit(submission(&[5]), 1).unwrap();
        assert!(review.request_adjustment("curto").is_err());
        review.request_adjustment("Revise o item 1").unwrap();
        assert_eq!(review.status(), ReviewStatus::AdjustmentRequested);
        assert_eq!(review.admin_feedback_for_manager(), Some("Revise o item 1"));
        assert_eq!(review.average_score(), Some(5.0));
    }

    #[test]
    fn full_round_trip_keeps_second_submission() {
        let mut review = pending_review("2024-05");
        review.submit(submission(&[4, 4]), 2).unwrap();
        review.request_adjustment("Notas inconsistentes com o diário").unwrap();
        review.submit(submission(&[9, 7]), 2).unwrap();
        assert!(review.admin_feedback_for_manager().is_none());
        review.approve(Timestamp::now()).unwrap();

        assert_eq!(review.status(), ReviewStatus::Completed);
        assert_eq!(review.average_score(), Some(8.0));
        assert!(review.completed_at().is_some());
    }

    #[test]
    fn kpi_score_completes_awaiting_review_only() {
        let mut pending = pending_review("2024-05");
        assert!(!pending.apply_kpi_score(3.0, Timestamp::now()));
        assert_eq!(pending.status(), ReviewStatus::Pending);
        assert_eq!(pending.kpi_score(), Some(3.0));

        let mut awaiting = pending_review("2024-05");
        awaiting.submit(submission(&[7]), 1).unwrap();
        assert!(awaiting.apply_kpi_score(3.0, Timestamp::now()));
        assert_eq!(awaiting.status(), ReviewStatus::Completed);
        assert!(awaiting.completed_at().is_some());
    }

    #[test]
    fn retracting_kpi_score_keeps_completion() {
        let mut review = pending_review("2024-05");
        review.submit(submission(&[7]), 1).unwrap();
        review.apply_kpi_score(3.0, Timestamp::now());
        review.retract_kpi_score();
        assert!(review.kpi_score().is_none());
        assert_eq!(review.status(), ReviewStatus::Completed);
    }

    #[test]
    fn only_responsible_manager_or_admin_may_manage() {
        let review = pending_review("2024-05");
        let manager = Actor::new(UserId::new("mgr-1").unwrap(), Role::Manager);
        let other_manager = Actor::new(UserId::new("mgr-2").unwrap(), Role::Manager);
        let employee = Actor::new(UserId::new("emp-1").unwrap(), Role::Collaborator);

        assert!(review.authorize_manage(&manager).is_ok());
        assert!(review.authorize_manage(&admin()).is_ok());
        assert!(review.authorize_manage(&other_manager).is_err());
        assert!(review.authorize_manage(&employee).is_err());

        assert!(review.authorize_view(&employee).is_ok());
        assert!(review.authorize_view(&other_manager).is_err());
    }
}
