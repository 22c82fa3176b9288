//! Body and query extractors that answer with [`ErrorResponse`] bodies.
//!
//! axum's own `Json` and `Query` reject with plain text. These wrappers keep
//! every client error in the `{code, message}` shape.

use axum::{
    async_trait,
    extract::{
        rejection::{JsonRejection, QueryRejection},
        FromRequest, FromRequestParts, Query, Request,
    },
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::de::DeserializeOwned;
use serde_json::json;

use crate::domain::foundation::ErrorCode;

use super::error::ErrorResponse;

/// JSON request body.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiJson<T>(pub T);

/// Query string.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiQuery<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(json_rejection(rejection)),
        }
    }
}

#[async_trait]
impl<T, S> FromRequestParts<S> for ApiQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Query::<T>::from_request_parts(parts, state).await {
            Ok(Query(value)) => Ok(Self(value)),
            Err(rejection) => Err(query_rejection(rejection)),
        }
    }
}

fn json_rejection(rejection: JsonRejection) -> Response {
    match rejection {
        JsonRejection::JsonDataError(err) => validation_failed(&err.body_text()),
        JsonRejection::JsonSyntaxError(err) => validation_failed(&err.body_text()),
        other => (
            other.status(),
            Json(ErrorResponse::bad_request(other.body_text())),
        )
            .into_response(),
    }
}

fn query_rejection(rejection: QueryRejection) -> Response {
    validation_failed(&rejection.body_text())
}

/// 400 `VALIDATION_FAILED`, naming the offending field when serde reported one.
fn validation_failed(body_text: &str) -> Response {
    let (field, message) = split_field(body_text);
    let mut body = ErrorResponse::new(ErrorCode::ValidationFailed, message);
    if let Some(field) = field {
        body = body.with_details(json!({ "field": field }));
    }
    (StatusCode::BAD_REQUEST, Json(body)).into_response()
}

/// Splits `"<prefix>: <path>: <reason>"` into the path and the reason.
fn split_field(body_text: &str) -> (Option<&str>, &str) {
    let detail = body_text
        .split_once(": ")
        .map_or(body_text, |(_, rest)| rest);
    match detail.split_once(": ") {
        Some((path, reason)) if is_field_path(path) => (Some(path), reason),
        _ => (None, detail),
    }
}

fn is_field_path(path: &str) -> bool {
    !path.is_empty()
        && path != "."
        && path
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '_' | '.' | '[' | ']'))
}
