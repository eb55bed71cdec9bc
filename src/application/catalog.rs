use super::error::CatalogError;
use crate::domain::video::{NewVideo, Video, VideoId};
use crate::ports::repository::VideoRepository;
use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info};

/// Where a new video's `url` comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UrlPolicy {
    /// `<server base>/video/<id>/data`, overwriting whatever the caller sent
    #[default]
    Derived,
    /// Kept as supplied by the caller
    CallerSupplied,
}

/// Catalog operations on top of a `VideoRepository`.
///
/// Likes are read-modify-write: the fetch, toggle and save of one video run
/// under that video's lock, so concurrent toggles are never lost.
pub struct CatalogService<R> {
    repo: Arc<R>,
    url_policy: UrlPolicy,
    locks: DashMap<VideoId, Arc<Mutex<()>>>,
}

impl<R> CatalogService<R>
where
    R: VideoRepository,
{
    pub fn new(repo: Arc<R>, url_policy: UrlPolicy) -> Self {
        Self {
            repo,
            url_policy,
            locks: DashMap::new(),
        }
    }

    /// Stores a new video. `server_base` is the scheme and authority the
    /// payload will be served from, used when urls are derived.
    pub async fn add(&self, new_video: NewVideo, server_base: &str) -> Result<Video, CatalogError> {
        self.add_video(new_video.into_video(), server_base).await
    }

    /// Insert-or-replace by id, assigning an id first if the video has none.
    pub async fn add_video(&self, mut video: Video, server_base: &str) -> Result<Video, CatalogError> {
        // A replaced record must not interleave with a like toggle on it
        let lock = video.has_id().then(|| self.lock_for(video.id));
        let _guard = match &lock {
            Some(lock) => Some(lock.lock().await),
            None => None,
        };

        if !video.has_id() {
            video.id = self.repo.next_id().await?;
        }
        if self.url_policy == UrlPolicy::Derived {
            video.url = Video::data_url(server_base, video.id);
        }
        self.repo.save(&video).await?;

        info!("Stored video {} ({:?})", video.id, video.name);
        Ok(video)
    }

    pub async fn list(&self) -> Result<Vec<Video>, CatalogError> {
        Ok(self.repo.find_all().await?)
    }

    pub async fn get(&self, id: VideoId) -> Result<Video, CatalogError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(CatalogError::NotFound(id))
    }

    pub async fn find_by_name(&self, name: &str) -> Result<Vec<Video>, CatalogError> {
        Ok(self.repo.find_by_name(name).await?)
    }

    pub async fn find_by_duration_less_than(&self, duration: u64) -> Result<Vec<Video>, CatalogError> {
        Ok(self.repo.find_by_duration_less_than(duration).await?)
    }

    pub async fn like(&self, id: VideoId, username: &str) -> Result<Video, CatalogError> {
        self.toggle(id, |video| {
            if video.like_by(username) {
                Ok(())
            } else {
                Err(CatalogError::AlreadyLiked {
                    id,
                    username: username.to_owned(),
                })
            }
        })
        .await
    }

    pub async fn unlike(&self, id: VideoId, username: &str) -> Result<Video, CatalogError> {
        self.toggle(id, |video| {
            if video.unlike_by(username) {
                Ok(())
            } else {
                Err(CatalogError::NotLiked {
                    id,
                    username: username.to_owned(),
                })
            }
        })
        .await
    }

    /// Usernames that currently like video `id`
    pub async fn liked_by(&self, id: VideoId) -> Result<Vec<String>, CatalogError> {
        let video = self.get(id).await?;
        Ok(video.liked_by().iter().cloned().collect())
    }

    fn lock_for(&self, id: VideoId) -> Arc<Mutex<()>> {
        self.locks.entry(id).or_default().clone()
    }

    async fn toggle<F>(&self, id: VideoId, apply: F) -> Result<Video, CatalogError>
    where
        F: FnOnce(&mut Video) -> Result<(), CatalogError>,
    {
        // Unknown ids never get a lock entry
        self.get(id).await?;

        let lock = self.lock_for(id);
        let _guard = lock.lock().await;

        let mut video = self.get(id).await?;
        apply(&mut video)?;
        self.repo.save(&video).await?;

        debug!("Video {} now has {} likes", id, video.likes());
        Ok(video)
    }
}
