use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Store-assigned video identifier. `0` means "not yet assigned".
pub type VideoId = u64;

pub const UNASSIGNED_ID: VideoId = 0;

/// Catalog path under which every video lives
pub const VIDEO_PATH: &str = "/video";

/// A catalog entry.
///
/// The like count is the size of the liker set, which only changes through
/// [`Video::like_by`] and [`Video::unlike_by`]. A stored `likes` field from
/// older records is ignored on load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Video {
    pub id: VideoId,
    pub name: String,
    pub url: String,
    pub duration: u64,
    #[serde(default)]
    liked_by: BTreeSet<String>,
}

impl Video {
    pub fn new(name: impl Into<String>, url: impl Into<String>, duration: u64) -> Self {
        Self {
            id: UNASSIGNED_ID,
            name: name.into(),
            url: url.into(),
            duration,
            liked_by: BTreeSet::new(),
        }
    }

    pub fn has_id(&self) -> bool {
        self.id != UNASSIGNED_ID
    }

    pub fn likes(&self) -> u64 {
        self.liked_by.len() as u64
    }

    pub fn liked_by(&self) -> &BTreeSet<String> {
        &self.liked_by
    }

    /// Adds `username` to the liker set.
    /// Returns false, leaving the video untouched, if the user already likes it.
    pub fn like_by(&mut self, username: &str) -> bool {
        self.liked_by.insert(username.to_owned())
    }

    /// Removes `username` from the liker set.
    /// Returns false, leaving the video untouched, if the user did not like it.
    pub fn unlike_by(&mut self, username: &str) -> bool {
        self.liked_by.remove(username)
    }

    /// Content equality: same `name`, `url` and `duration`, whatever the id or likers.
    pub fn same_content(&self, other: &Video) -> bool {
        self.name == other.name && self.url == other.url && self.duration == other.duration
    }

    /// Public location of a video's binary payload: `<base>/video/<id>/data`.
    pub fn data_url(base: &str, id: VideoId) -> String {
        format!("{}{}/{}/data", base.trim_end_matches('/'), VIDEO_PATH, id)
    }
}

/// Caller-supplied partial record used to create a video.
///
/// Any id, like count or liker set sent by the client is ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewVideo {
    pub name: String,
    #[serde(default, alias = "dataUrl")]
    pub url: Option<String>,
    #[serde(default)]
    pub duration: u64,
}

impl NewVideo {
    pub fn new(name: impl Into<String>, url: Option<String>, duration: u64) -> Self {
        Self {
            name: name.into(),
            url,
            duration,
        }
    }

    pub fn into_video(self) -> Video {
        Video::new(self.name, self.url.unwrap_or_default(), self.duration)
    }
}
