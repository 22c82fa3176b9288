//! HTTP handlers for review endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::{handle_review_error, parse_optional, parse_param};
use crate::adapters::http::extract::{ApiJson, ApiQuery};
use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::ApiPorts;
use crate::application::handlers::observation::{
    AddWeeklyObservationCommand, AddWeeklyObservationHandler, DeleteWeeklyObservationCommand,
    DeleteWeeklyObservationHandler,
};
use crate::application::handlers::review::{
    ApproveReviewCommand, ApproveReviewHandler, CreateReviewsCommand, CreateReviewsHandler,
    DeleteReviewCommand, DeleteReviewHandler, GenerateFeedbackCommand, GenerateFeedbackHandler,
    GetReviewDetailsHandler, GetReviewDetailsQuery, ListReviewsHandler, ListReviewsQuery,
    RequestAdjustmentCommand, RequestAdjustmentHandler, SubmitReviewCommand, SubmitReviewHandler,
};
use crate::domain::foundation::{AuthenticatedUser, CommandMetadata, ObservationId, ReviewId};

use super::dto::{
    AddObservationRequest, CreateReviewsRequest, CreateReviewsResponse, FeedbackDraftRequest,
    FeedbackDraftResponse, ListReviewsParams, ObservationResponse, RequestAdjustmentRequest,
    ReviewCommandResponse, ReviewDetailsResponse, ReviewResponse, SubmitReviewRequest,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct ReviewHandlers {
    create: Arc<CreateReviewsHandler>,
    submit: Arc<SubmitReviewHandler>,
    request_adjustment: Arc<RequestAdjustmentHandler>,
    approve: Arc<ApproveReviewHandler>,
    delete: Arc<DeleteReviewHandler>,
    details: Arc<GetReviewDetailsHandler>,
    list: Arc<ListReviewsHandler>,
    feedback: Arc<GenerateFeedbackHandler>,
    add_observation: Arc<AddWeeklyObservationHandler>,
    delete_observation: Arc<DeleteWeeklyObservationHandler>,
}

impl ReviewHandlers {
    pub fn new(ports: &ApiPorts) -> Self {
        Self {
            create: Arc::new(CreateReviewsHandler::new(
                ports.reviews.clone(),
                ports.templates.clone(),
                ports.directory.clone(),
                ports.event_publisher.clone(),
            )),
            submit: Arc::new(SubmitReviewHandler::new(
                ports.reviews.clone(),
                ports.templates.clone(),
                ports.event_publisher.clone(),
            )),
            request_adjustment: Arc::new(RequestAdjustmentHandler::new(
                ports.reviews.clone(),
                ports.event_publisher.clone(),
            )),
            approve: Arc::new(ApproveReviewHandler::new(
                ports.reviews.clone(),
                ports.event_publisher.clone(),
            )),
            delete: Arc::new(DeleteReviewHandler::new(
                ports.reviews.clone(),
                ports.event_publisher.clone(),
            )),
            details: Arc::new(GetReviewDetailsHandler::new(
                ports.reviews.clone(),
                ports.templates.clone(),
                ports.observations.clone(),
            )),
            list: Arc::new(ListReviewsHandler::new(ports.reviews.clone())),
            feedback: Arc::new(GenerateFeedbackHandler::new(
                ports.reviews.clone(),
                ports.templates.clone(),
                ports.feedback_generator.clone(),
            )),
            add_observation: Arc::new(AddWeeklyObservationHandler::new(
                ports.reviews.clone(),
                ports.observations.clone(),
            )),
            delete_observation: Arc::new(DeleteWeeklyObservationHandler::new(
                ports.reviews.clone(),
                ports.observations.clone(),
            )),
        }
    }
}

pub(crate) fn metadata_for(user: &AuthenticatedUser) -> CommandMetadata {
    CommandMetadata::new(user.actor()).with_source("http")
}

fn review_id(raw: &str) -> Result<ReviewId, Response> {
    parse_param("review ID", raw)
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// GET /api/reviews - List reviews visible to the caller
pub async fn list_reviews(
    State(handlers): State<ReviewHandlers>,
    RequireAuth(user): RequireAuth,
    ApiQuery(params): ApiQuery<ListReviewsParams>,
) -> Response {
    let period = match parse_optional("period", params.period.as_deref()) {
        Ok(p) => p,
        Err(response) => return response,
    };
    let department_id = match parse_optional("department ID", params.department_id.as_deref()) {
        Ok(d) => d,
        Err(response) => return response,
    };

    let query = ListReviewsQuery {
        actor: user.actor(),
        period,
        department_id,
    };

    match handlers.list.handle(query).await {
        Ok(reviews) => {
            let body: Vec<ReviewResponse> = reviews.iter().map(ReviewResponse::from).collect();
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(e) => handle_review_error(e),
    }
}

/// POST /api/reviews - Open reviews for the current period
pub async fn create_reviews(
    State(handlers): State<ReviewHandlers>,
    RequireAuth(user): RequireAuth,
    ApiJson(req): ApiJson<CreateReviewsRequest>,
) -> Response {
    let cmd = CreateReviewsCommand {
        employee_ids: req.employee_ids,
        template_id: req.template_id,
    };

    match handlers.create.handle(cmd, metadata_for(&user)).await {
        Ok(result) => {
            let response = CreateReviewsResponse::from(result);
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(e) => handle_review_error(e),
    }
}

/// GET /api/reviews/:id - Review with items, observations and previous result
pub async fn get_review(
    State(handlers): State<ReviewHandlers>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
) -> Response {
    let review_id = match review_id(&id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let query = GetReviewDetailsQuery {
        review_id,
        actor: user.actor(),
    };

    match handlers.details.handle(query).await {
        Ok(details) => (StatusCode::OK, Json(ReviewDetailsResponse::from(details))).into_response(),
        Err(e) => handle_review_error(e),
    }
}

/// DELETE /api/reviews/:id
pub async fn delete_review(
    State(handlers): State<ReviewHandlers>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
) -> Response {
    let review_id = match review_id(&id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match handlers
        .delete
        .handle(DeleteReviewCommand { review_id }, metadata_for(&user))
        .await
    {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => handle_review_error(e),
    }
}

/// POST /api/reviews/:id/submit
pub async fn submit_review(
    State(handlers): State<ReviewHandlers>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<SubmitReviewRequest>,
) -> Response {
    let review_id = match review_id(&id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let cmd = SubmitReviewCommand {
        review_id,
        scores: req.scores,
        feedback_for_employee: req.feedback_for_employee,
        manager_observations: req.manager_observations,
    };

    match handlers.submit.handle(cmd, metadata_for(&user)).await {
        Ok(result) => {
            let response = ReviewCommandResponse {
                success: true,
                message: format!(
                    "Review submitted for approval with average {:.2}",
                    result.average_score
                ),
                review: ReviewResponse::from(&result.review),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_review_error(e),
    }
}

/// POST /api/reviews/:id/request-adjustment
pub async fn request_adjustment(
    State(handlers): State<ReviewHandlers>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<RequestAdjustmentRequest>,
) -> Response {
    let review_id = match review_id(&id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let cmd = RequestAdjustmentCommand {
        review_id,
        feedback_for_manager: req.feedback_for_manager,
    };

    match handlers.request_adjustment.handle(cmd, metadata_for(&user)).await {
        Ok(review) => {
            let response = ReviewCommandResponse {
                success: true,
                message: "Adjustment requested".to_string(),
                review: ReviewResponse::from(&review),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_review_error(e),
    }
}

/// POST /api/reviews/:id/approve
pub async fn approve_review(
    State(handlers): State<ReviewHandlers>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
) -> Response {
    let review_id = match review_id(&id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match handlers
        .approve
        .handle(ApproveReviewCommand { review_id }, metadata_for(&user))
        .await
    {
        Ok(review) => {
            let response = ReviewCommandResponse {
                success: true,
                message: "Review approved".to_string(),
                review: ReviewResponse::from(&review),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_review_error(e),
    }
}

/// POST /api/reviews/:id/feedback-draft - Drafts feedback; nothing is saved
pub async fn feedback_draft(
    State(handlers): State<ReviewHandlers>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<FeedbackDraftRequest>,
) -> Response {
    let review_id = match review_id(&id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let cmd = GenerateFeedbackCommand {
        review_id,
        scores: req.scores,
        manager_observations: req.manager_observations,
    };

    match handlers.feedback.handle(cmd, metadata_for(&user)).await {
        Ok(feedback) => (StatusCode::OK, Json(FeedbackDraftResponse { feedback })).into_response(),
        Err(e) => handle_review_error(e),
    }
}

/// POST /api/reviews/:id/observations
pub async fn add_observation(
    State(handlers): State<ReviewHandlers>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<AddObservationRequest>,
) -> Response {
    let review_id = match review_id(&id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let cmd = AddWeeklyObservationCommand {
        review_id,
        text: req.text,
    };

    match handlers.add_observation.handle(cmd, metadata_for(&user)).await {
        Ok(observation) => {
            (StatusCode::CREATED, Json(ObservationResponse::from(observation))).into_response()
        }
        Err(e) => handle_review_error(e),
    }
}

/// DELETE /api/reviews/:id/observations/:obs_id
pub async fn delete_observation(
    State(handlers): State<ReviewHandlers>,
    RequireAuth(user): RequireAuth,
    Path((id, obs_id)): Path<(String, String)>,
) -> Response {
    let review_id = match review_id(&id) {
        Ok(id) => id,
        Err(response) => return response,
    };
    let observation_id: ObservationId = match parse_param("observation ID", &obs_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let cmd = DeleteWeeklyObservationCommand {
        review_id,
        observation_id,
    };

    match handlers.delete_observation.handle(cmd, metadata_for(&user)).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => handle_review_error(e),
    }
}
