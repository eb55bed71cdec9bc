//! Request extractors whose rejections render as [`ApiError`].
//!
//! Use these instead of axum's `Json`, `Query` and `Path` so malformed
//! bodies, query strings and ids get the same `{"error": ...}` shape as
//! every other failure.

use super::error::ApiError;
use crate::domain::video::VideoId;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{FromRequest, FromRequestParts, Path, Query, Request};
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::Json;
use serde::de::DeserializeOwned;

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            return ApiError::PayloadTooLarge;
        }
        ApiError::BadRequest(format!("Invalid request body: {}", rejection.body_text()))
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(format!("Invalid query: {}", rejection.body_text()))
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::BadRequest(format!("Invalid path: {}", rejection.body_text()))
    }
}

/// JSON request body.
#[derive(Debug, Clone, Copy)]
pub struct ValidatedJson<T>(pub T);

#[axum::async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(inner) = Json::<T>::from_request(req, state).await?;
        Ok(ValidatedJson(inner))
    }
}

/// Query string parameters.
#[derive(Debug, Clone, Copy)]
pub struct ValidatedQuery<T>(pub T);

#[axum::async_trait]
impl<T, S> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(inner) = Query::<T>::from_request_parts(parts, state).await?;
        Ok(ValidatedQuery(inner))
    }
}

/// The `:id` segment of a `/video/:id/...` route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VideoPath(pub VideoId);

#[axum::async_trait]
impl<S> FromRequestParts<S> for VideoPath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<VideoId>::from_request_parts(parts, state).await?;
        Ok(VideoPath(id))
    }
}
