//! HTTP routes for review endpoints.

use axum::{
    routing::{delete, get, post},
    Router,
};

use super::handlers::{
    add_observation, approve_review, create_reviews, delete_observation, delete_review,
    feedback_draft, get_review, list_reviews, request_adjustment, submit_review, ReviewHandlers,
};

/// Creates the review router, mounted at `/api/reviews`.
pub fn review_routes(handlers: ReviewHandlers) -> Router {
    Router::new()
        .route("/", get(list_reviews).post(create_reviews))
        .route("/:id", get(get_review).delete(delete_review))
        .route("/:id/submit", post(submit_review))
        .route("/:id/request-adjustment", post(request_adjustment))
        .route("/:id/approve", post(approve_review))
        .route("/:id/feedback-draft", post(feedback_draft))
        .route("/:id/observations", post(add_observation))
        .route("/:id/observations/:obs_id", delete(delete_observation))
        .with_state(handlers)
}
