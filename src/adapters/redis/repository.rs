//! Redis VideoRepository implementation.

use super::pool::RedisPool;
use super::{video_key, VIDEO_ID_COUNTER, VIDEO_INDEX};
use crate::domain::video::{Video, VideoId};
use crate::ports::repository::{RepositoryError, VideoRepository};
use async_trait::async_trait;
use deadpool_redis::redis::AsyncCommands;

#[async_trait]
impl VideoRepository for RedisPool {
    async fn next_id(&self) -> Result<VideoId, RepositoryError> {
        let mut conn = self.connection().await?;
        let id: u64 = conn.incr(VIDEO_ID_COUNTER, 1u64).await?;
        Ok(id)
    }

    async fn save(&self, video: &Video) -> Result<(), RepositoryError> {
        let mut conn = self.connection().await?;
        let json = serde_json::to_string(video)?;

        // Record first, so an id in the index always resolves
        conn.set::<_, _, ()>(video_key(video.id), json).await?;
        conn.sadd::<_, _, ()>(VIDEO_INDEX, video.id).await?;
        Ok(())
    }

    async fn find_by_id(&self, id: VideoId) -> Result<Option<Video>, RepositoryError> {
        let mut conn = self.connection().await?;
        let json: Option<String> = conn.get(video_key(id)).await?;
        match json {
            Some(data) => Ok(Some(serde_json::from_str(&data)?)),
            None => Ok(None),
        }
    }

    async fn find_all(&self) -> Result<Vec<Video>, RepositoryError> {
        let mut conn = self.connection().await?;
        let ids: Vec<VideoId> = conn.smembers(VIDEO_INDEX).await?;
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let keys: Vec<String> = ids.into_iter().map(video_key).collect();
        let records: Vec<Option<String>> = deadpool_redis::redis::cmd("MGET")
            .arg(&keys)
            .query_async(&mut conn)
            .await?;

        records
            .into_iter()
            .flatten()
            .map(|data| serde_json::from_str(&data).map_err(RepositoryError::from))
            .collect()
    }
}
