//! Connection handling for the Redis video store.

use super::error::StoreError;
use deadpool_redis::{Config, Connection, Pool, Runtime};
use tracing::debug;

/// Video catalog kept in Redis, see the module docs for the key layout.
///
/// Cloning shares the underlying connection pool. Connections are opened
/// lazily, so an unreachable server surfaces on the first request.
#[derive(Clone)]
pub struct RedisPool {
    pool: Pool,
}

impl RedisPool {
    pub fn new(redis_url: &str) -> Result<Self, StoreError> {
        let pool = Config::from_url(redis_url).create_pool(Some(Runtime::Tokio1))?;
        debug!("Created Redis pool for the video catalog");
        Ok(Self { pool })
    }

    pub(super) async fn connection(&self) -> Result<Connection, StoreError> {
        Ok(self.pool.get().await?)
    }
}
