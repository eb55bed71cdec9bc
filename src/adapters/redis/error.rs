//! Redis error types for the repository adapter.

use crate::ports::repository::RepositoryError;
use deadpool_redis::CreatePoolError;

pub type RedisError = deadpool_redis::redis::RedisError;
pub type PoolError = deadpool_redis::PoolError;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Redis error: {0}")]
    Redis(#[from] RedisError),
    #[error("Pool error: {0}")]
    Pool(#[from] PoolError),
    #[error("Create pool error: {0}")]
    CreatePool(String),
}

impl From<CreatePoolError> for StoreError {
    fn from(err: CreatePoolError) -> Self {
        StoreError::CreatePool(format!("{}", err))
    }
}

impl From<StoreError> for RepositoryError {
    fn from(err: StoreError) -> Self {
        RepositoryError::Backend(Box::new(err))
    }
}

impl From<RedisError> for RepositoryError {
    fn from(err: RedisError) -> Self {
        StoreError::from(err).into()
    }
}

impl From<PoolError> for RepositoryError {
    fn from(err: PoolError) -> Self {
        StoreError::from(err).into()
    }
}
