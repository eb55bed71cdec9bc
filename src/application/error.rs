use crate::domain::video::VideoId;
use crate::ports::repository::RepositoryError;
use crate::ports::storage::StorageError;

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Video {0} not found")]
    NotFound(VideoId),

    #[error("Video {id} is already liked by {username}")]
    AlreadyLiked { id: VideoId, username: String },

    #[error("Video {id} is not liked by {username}")]
    NotLiked { id: VideoId, username: String },

    #[error("No data uploaded for video {0}")]
    NoData(VideoId),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}
