use crate::domain::video::{Video, VideoId};
use async_trait::async_trait;

/// Failure of the backing store, propagated unchanged to callers.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("Backend error: {0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Authoritative store of all videos, keyed by id.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VideoRepository: Send + Sync {
    /// Next id from a monotonically increasing counter; never handed out twice
    async fn next_id(&self) -> Result<VideoId, RepositoryError>;

    /// Insert or replace the video stored under `video.id`
    async fn save(&self, video: &Video) -> Result<(), RepositoryError>;

    async fn find_by_id(&self, id: VideoId) -> Result<Option<Video>, RepositoryError>;

    /// Every stored video, in no particular order
    async fn find_all(&self) -> Result<Vec<Video>, RepositoryError>;

    /// Videos whose name is exactly `name` (case-sensitive)
    async fn find_by_name(&self, name: &str) -> Result<Vec<Video>, RepositoryError> {
        let mut videos = self.find_all().await?;
        videos.retain(|v| v.name == name);
        Ok(videos)
    }

    /// Videos whose duration is strictly less than `duration`
    async fn find_by_duration_less_than(
        &self,
        duration: u64,
    ) -> Result<Vec<Video>, RepositoryError> {
        let mut videos = self.find_all().await?;
        videos.retain(|v| v.duration < duration);
        Ok(videos)
    }
}
