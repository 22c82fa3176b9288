//! Review command and query handlers.

// Command handlers
mod approve_review;
mod create_reviews;
mod delete_review;
mod generate_feedback;
mod request_adjustment;
mod submit_review;

// Query handlers
mod get_review_details;
mod list_reviews;

pub use approve_review::{ApproveReviewCommand, ApproveReviewHandler};
pub use create_reviews::{CreateReviewsCommand, CreateReviewsHandler, CreateReviewsResult};
pub use delete_review::{DeleteReviewCommand, DeleteReviewHandler};
pub use generate_feedback::{GenerateFeedbackCommand, GenerateFeedbackHandler};
pub use request_adjustment::{RequestAdjustmentCommand, RequestAdjustmentHandler};
pub use submit_review::{SubmitReviewCommand, SubmitReviewHandler, SubmitReviewResult};

pub use get_review_details::{
    GetReviewDetailsHandler, GetReviewDetailsQuery, PreviousReview, ReviewDetails,
};
pub use list_reviews::{ListReviewsHandler, ListReviewsQuery};
