//! HTTP inbound adapter.
//!
//! Exposes the catalog as a JSON API under `/video`, with payload
//! upload/download and per-user likes. Every route requires HTTP Basic
//! credentials; writes need the admin role, reads the user role.

pub mod auth;
pub mod data;
pub mod error;
pub mod extract;
pub mod videos;

use crate::application::catalog::CatalogService;
use crate::application::data::VideoDataService;
use crate::ports::repository::VideoRepository;
use crate::ports::storage::VideoDataPort;
use auth::UserDirectory;
use axum::extract::{DefaultBodyLimit, FromRef};
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;

pub use auth::Principal;
pub use error::ApiError;

/// Shared state handed to every handler.
pub struct AppState<R, D> {
    pub catalog: Arc<CatalogService<R>>,
    pub data: Arc<VideoDataService<R, D>>,
    pub users: Arc<UserDirectory>,
    /// Scheme and authority used for derived data urls instead of the request's Host
    pub public_base_url: Option<String>,
}

impl<R, D> Clone for AppState<R, D> {
    fn clone(&self) -> Self {
        Self {
            catalog: self.catalog.clone(),
            data: self.data.clone(),
            users: self.users.clone(),
            public_base_url: self.public_base_url.clone(),
        }
    }
}

impl<R, D> AppState<R, D> {
    pub fn new(
        catalog: Arc<CatalogService<R>>,
        data: Arc<VideoDataService<R, D>>,
        users: UserDirectory,
    ) -> Self {
        Self {
            catalog,
            data,
            users: Arc::new(users),
            public_base_url: None,
        }
    }

    pub fn with_public_base_url(mut self, base: Option<String>) -> Self {
        self.public_base_url = base;
        self
    }

    /// Base the current request is served from, e.g. `http://localhost:8080`.
    pub fn server_base(&self, host: Option<&str>) -> String {
        match (&self.public_base_url, host) {
            (Some(base), _) => base.clone(),
            (None, Some(host)) => format!("http://{}", host),
            (None, None) => String::from("http://localhost"),
        }
    }
}

impl<R, D> FromRef<AppState<R, D>> for Arc<UserDirectory> {
    fn from_ref(state: &AppState<R, D>) -> Self {
        state.users.clone()
    }
}

pub fn router<R, D>(state: AppState<R, D>) -> Router
where
    R: VideoRepository + 'static,
    D: VideoDataPort + 'static,
{
    Router::new()
        .route("/video", get(videos::list::<R, D>).post(videos::add::<R, D>))
        .route("/video/search/findByName", get(videos::find_by_name::<R, D>))
        .route(
            "/video/search/findByDurationLessThan",
            get(videos::find_by_duration_less_than::<R, D>),
        )
        .route("/video/:id", get(videos::get::<R, D>))
        .route(
            "/video/:id/data",
            get(data::download::<R, D>)
                .head(data::exists::<R, D>)
                .post(data::upload::<R, D>)
                .layer(DefaultBodyLimit::disable()),
        )
        .route("/video/:id/like", post(videos::like::<R, D>))
        .route("/video/:id/unlike", post(videos::unlike::<R, D>))
        .route("/video/:id/likedby", get(videos::liked_by::<R, D>))
        .with_state(state)
}
