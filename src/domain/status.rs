use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum VideoState {
    Ready,
}

/// Returned to the client once a video's payload has been stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoStatus {
    pub state: VideoState,
}

impl VideoStatus {
    pub fn ready() -> Self {
        Self {
            state: VideoState::Ready,
        }
    }
}
