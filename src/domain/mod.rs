//! Domain layer - Pure business logic.

pub mod status;
pub mod user;
pub mod video;

pub use status::{VideoState, VideoStatus};
pub use user::{Role, UserAccount};
pub use video::{NewVideo, Video, VideoId};
