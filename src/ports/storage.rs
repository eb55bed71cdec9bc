use crate::domain::video::VideoId;
use async_trait::async_trait;
use std::pin::Pin;
use tokio::io::AsyncRead;

pub type DataReader<'a> = Pin<Box<dyn AsyncRead + Send + 'a>>;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid path: {0}")]
    InvalidPath(String),
}

/// Binary payload storage, one payload per video.
#[async_trait]
pub trait VideoDataPort: Send + Sync {
    /// Store (or replace) the payload of video `id`, returning the number of bytes written
    async fn save_data(&self, id: VideoId, data: DataReader<'_>) -> Result<u64, StorageError>;

    /// Open the payload of video `id`, `None` if nothing was uploaded
    async fn load_data(&self, id: VideoId) -> Result<Option<DataReader<'static>>, StorageError>;

    async fn has_data(&self, id: VideoId) -> Result<bool, StorageError>;
}
