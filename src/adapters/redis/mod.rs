//! Redis adapter: the database-backed `VideoRepository`.
//!
//! Layout:
//! - `vidcat:video_id` counter, advanced with `INCR`
//! - `vidcat:video:<id>` JSON record
//! - `vidcat:videos` set of stored ids

mod error;
mod pool;
mod repository;

pub use error::StoreError;
pub use pool::RedisPool;

/// Redis key constants
const VIDEO_ID_COUNTER: &str = "vidcat:video_id";
const VIDEO_PREFIX: &str = "vidcat:video:";
const VIDEO_INDEX: &str = "vidcat:videos";

fn video_key(id: crate::domain::video::VideoId) -> String {
    format!("{}{}", VIDEO_PREFIX, id)
}
