//! In-memory video repository.
//!
//! Videos live in a `DashMap` keyed by id and ids come from a process-wide
//! atomic counter. Nothing survives a restart.

use crate::domain::video::{Video, VideoId};
use crate::ports::repository::{RepositoryError, VideoRepository};
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Default)]
pub struct InMemoryVideoRepository {
    videos: DashMap<VideoId, Video>,
    last_id: AtomicU64,
}

impl InMemoryVideoRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.videos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.videos.is_empty()
    }

    fn collect_where(&self, keep: impl Fn(&Video) -> bool) -> Vec<Video> {
        self.videos
            .iter()
            .filter(|entry| keep(entry.value()))
            .map(|entry| entry.value().clone())
            .collect()
    }
}

#[async_trait]
impl VideoRepository for InMemoryVideoRepository {
    async fn next_id(&self) -> Result<VideoId, RepositoryError> {
        Ok(self.last_id.fetch_add(1, Ordering::SeqCst) + 1)
    }

    async fn save(&self, video: &Video) -> Result<(), RepositoryError> {
        self.videos.insert(video.id, video.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: VideoId) -> Result<Option<Video>, RepositoryError> {
        Ok(self.videos.get(&id).map(|entry| entry.value().clone()))
    }

    async fn find_all(&self) -> Result<Vec<Video>, RepositoryError> {
        Ok(self.collect_where(|_| true))
    }

    async fn find_by_name(&self, name: &str) -> Result<Vec<Video>, RepositoryError> {
        Ok(self.collect_where(|v| v.name == name))
    }

    async fn find_by_duration_less_than(
        &self,
        duration: u64,
    ) -> Result<Vec<Video>, RepositoryError> {
        Ok(self.collect_where(|v| v.duration < duration))
    }
}
