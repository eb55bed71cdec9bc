use super::error::CatalogError;
use crate::domain::status::VideoStatus;
use crate::domain::video::VideoId;
use crate::ports::repository::VideoRepository;
use crate::ports::storage::{DataReader, VideoDataPort};
use std::sync::Arc;
use tracing::info;

/// Binary payload upload and download for catalogued videos.
pub struct VideoDataService<R, D> {
    repo: Arc<R>,
    data: D,
}

impl<R, D> VideoDataService<R, D>
where
    R: VideoRepository,
    D: VideoDataPort,
{
    pub fn new(repo: Arc<R>, data: D) -> Self {
        Self { repo, data }
    }

    async fn ensure_exists(&self, id: VideoId) -> Result<(), CatalogError> {
        match self.repo.find_by_id(id).await? {
            Some(_) => Ok(()),
            None => Err(CatalogError::NotFound(id)),
        }
    }

    pub async fn upload(
        &self,
        id: VideoId,
        data: DataReader<'_>,
    ) -> Result<VideoStatus, CatalogError> {
        self.ensure_exists(id).await?;
        let written = self.data.save_data(id, data).await?;
        info!("Stored {} bytes of data for video {}", written, id);
        Ok(VideoStatus::ready())
    }

    pub async fn download(&self, id: VideoId) -> Result<DataReader<'static>, CatalogError> {
        self.ensure_exists(id).await?;
        self.data
            .load_data(id)
            .await?
            .ok_or(CatalogError::NoData(id))
    }

    pub async fn has_data(&self, id: VideoId) -> Result<bool, CatalogError> {
        self.ensure_exists(id).await?;
        Ok(self.data.has_data(id).await?)
    }
}
