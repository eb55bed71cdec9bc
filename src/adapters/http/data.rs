//! Video payload upload and download (`/video/:id/data`).

use super::auth::Principal;
use super::error::ApiError;
use super::extract::VideoPath;
use super::AppState;
use crate::application::error::CatalogError;
use crate::domain::status::VideoStatus;
use crate::domain::user::Role;
use crate::domain::video::VideoId;
use crate::ports::repository::VideoRepository;
use crate::ports::storage::VideoDataPort;
use axum::body::Body;
use axum::extract::{Multipart, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use futures::TryStreamExt;
use std::io;
use tokio_util::io::{ReaderStream, StreamReader};

/// Multipart field carrying the payload
pub const DATA_FIELD: &str = "data";

pub async fn upload<R, D>(
    State(state): State<AppState<R, D>>,
    principal: Principal,
    VideoPath(id): VideoPath,
    mut multipart: Multipart,
) -> Result<Json<VideoStatus>, ApiError>
where
    R: VideoRepository + 'static,
    D: VideoDataPort + 'static,
{
    principal.require(Role::Admin)?;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(e.to_string()))?
    {
        if field.name() != Some(DATA_FIELD) {
            continue;
        }

        let body_with_io_error = field.map_err(|err| io::Error::new(io::ErrorKind::Other, err));
        let reader = StreamReader::new(body_with_io_error);
        let status = state.data.upload(id, Box::pin(reader)).await?;
        return Ok(Json(status));
    }

    Err(ApiError::BadRequest(format!(
        "missing multipart field {:?}",
        DATA_FIELD
    )))
}

pub async fn download<R, D>(
    State(state): State<AppState<R, D>>,
    principal: Principal,
    VideoPath(id): VideoPath,
) -> Result<Response, ApiError>
where
    R: VideoRepository + 'static,
    D: VideoDataPort + 'static,
{
    principal.require(Role::User)?;

    let reader = state.data.download(id).await?;
    Ok((
        [(header::CONTENT_TYPE, content_type(id))],
        Body::from_stream(ReaderStream::new(reader)),
    )
        .into_response())
}

/// `HEAD /video/:id/data`: 200 when a payload is stored, 404 otherwise.
pub async fn exists<R, D>(
    State(state): State<AppState<R, D>>,
    principal: Principal,
    VideoPath(id): VideoPath,
) -> Result<Response, ApiError>
where
    R: VideoRepository + 'static,
    D: VideoDataPort + 'static,
{
    principal.require(Role::User)?;

    if !state.data.has_data(id).await? {
        return Err(CatalogError::NoData(id).into());
    }
    Ok(([(header::CONTENT_TYPE, content_type(id))], StatusCode::OK).into_response())
}

fn content_type(id: VideoId) -> String {
    mime_guess::from_path(format!("video{}.mpg", id))
        .first_or_octet_stream()
        .to_string()
}
