//! Catalog endpoints under `/video`.

use super::auth::Principal;
use super::error::ApiError;
use super::extract::{ValidatedJson, ValidatedQuery, VideoPath};
use super::AppState;
use crate::domain::user::Role;
use crate::domain::video::{NewVideo, Video, VideoId};
use crate::ports::repository::VideoRepository;
use crate::ports::storage::VideoDataPort;
use axum::extract::{Host, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

/// A video as returned to clients; likers are only exposed through `/likedby`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoResponse {
    pub id: VideoId,
    pub name: String,
    pub url: String,
    pub duration: u64,
    pub likes: u64,
}

impl From<Video> for VideoResponse {
    fn from(video: Video) -> Self {
        Self {
            likes: video.likes(),
            id: video.id,
            name: video.name,
            url: video.url,
            duration: video.duration,
        }
    }
}

fn responses(videos: Vec<Video>) -> Json<Vec<VideoResponse>> {
    Json(videos.into_iter().map(VideoResponse::from).collect())
}

#[derive(Debug, Deserialize)]
pub struct TitleQuery {
    pub title: String,
}

#[derive(Debug, Deserialize)]
pub struct DurationQuery {
    pub duration: u64,
}

pub async fn list<R, D>(
    State(state): State<AppState<R, D>>,
    principal: Principal,
) -> Result<Json<Vec<VideoResponse>>, ApiError>
where
    R: VideoRepository + 'static,
    D: VideoDataPort + 'static,
{
    principal.require(Role::User)?;
    Ok(responses(state.catalog.list().await?))
}

pub async fn add<R, D>(
    State(state): State<AppState<R, D>>,
    principal: Principal,
    host: Option<Host>,
    ValidatedJson(new_video): ValidatedJson<NewVideo>,
) -> Result<Json<VideoResponse>, ApiError>
where
    R: VideoRepository + 'static,
    D: VideoDataPort + 'static,
{
    principal.require(Role::Admin)?;
    let base = state.server_base(host.as_ref().map(|Host(host)| host.as_str()));
    let video = state.catalog.add(new_video, &base).await?;
    Ok(Json(video.into()))
}

pub async fn get<R, D>(
    State(state): State<AppState<R, D>>,
    principal: Principal,
    VideoPath(id): VideoPath,
) -> Result<Json<VideoResponse>, ApiError>
where
    R: VideoRepository + 'static,
    D: VideoDataPort + 'static,
{
    principal.require(Role::User)?;
    Ok(Json(state.catalog.get(id).await?.into()))
}

pub async fn like<R, D>(
    State(state): State<AppState<R, D>>,
    principal: Principal,
    VideoPath(id): VideoPath,
) -> Result<StatusCode, ApiError>
where
    R: VideoRepository + 'static,
    D: VideoDataPort + 'static,
{
    principal.require(Role::Admin)?;
    state.catalog.like(id, principal.name()).await?;
    Ok(StatusCode::OK)
}

pub async fn unlike<R, D>(
    State(state): State<AppState<R, D>>,
    principal: Principal,
    VideoPath(id): VideoPath,
) -> Result<StatusCode, ApiError>
where
    R: VideoRepository + 'static,
    D: VideoDataPort + 'static,
{
    principal.require(Role::Admin)?;
    state.catalog.unlike(id, principal.name()).await?;
    Ok(StatusCode::OK)
}

pub async fn liked_by<R, D>(
    State(state): State<AppState<R, D>>,
    principal: Principal,
    VideoPath(id): VideoPath,
) -> Result<Json<Vec<String>>, ApiError>
where
    R: VideoRepository + 'static,
    D: VideoDataPort + 'static,
{
    principal.require(Role::User)?;
    Ok(Json(state.catalog.liked_by(id).await?))
}

pub async fn find_by_name<R, D>(
    State(state): State<AppState<R, D>>,
    principal: Principal,
    ValidatedQuery(query): ValidatedQuery<TitleQuery>,
) -> Result<Json<Vec<VideoResponse>>, ApiError>
where
    R: VideoRepository + 'static,
    D: VideoDataPort + 'static,
{
    principal.require(Role::User)?;
    Ok(responses(state.catalog.find_by_name(&query.title).await?))
}

pub async fn find_by_duration_less_than<R, D>(
    State(state): State<AppState<R, D>>,
    principal: Principal,
    ValidatedQuery(query): ValidatedQuery<DurationQuery>,
) -> Result<Json<Vec<VideoResponse>>, ApiError>
where
    R: VideoRepository + 'static,
    D: VideoDataPort + 'static,
{
    principal.require(Role::User)?;
    Ok(responses(
        state.catalog.find_by_duration_less_than(query.duration).await?,
    ))
}
