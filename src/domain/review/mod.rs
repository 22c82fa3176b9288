//! Review domain: the performance review lifecycle, templates and notes.

mod aggregate;
mod errors;
mod events;
mod observation;
mod scores;
mod status;
mod template;

pub use aggregate::{
    PerformanceReview, ReviewSubject, ReviewSubmission, ADJUSTMENT_FEEDBACK_MIN_CHARS,
    FEEDBACK_MIN_CHARS,
};
pub use errors::ReviewError;
pub use events::{
    ReviewAdjustmentRequested, ReviewApproved, ReviewDeleted, ReviewSubmitted, ReviewsCreated,
};
pub use observation::{DiaryEntry, WeeklyObservation};
pub use scores::{ItemScore, ItemScores, MAX_ITEM_SCORE};
pub use status::ReviewStatus;
pub use template::{
    EvaluationItem, ReviewTemplate, TemplateAssignment, ITEM_TEXT_MIN_CHARS,
    TEMPLATE_NAME_MIN_CHARS,
};

#[cfg(test)]
pub(crate) use aggregate::test_support;
