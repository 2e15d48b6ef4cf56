//! Catalog entities

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A locally stored video record mirroring one remote video.
///
/// `guid` is the foreign key into the remote catalog; `(library_id, guid)`
/// is unique across the table. `raw_metadata` holds the serialized remote
/// record verbatim.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct VideoPost {
    /// Locally owned identifier
    pub id: String,

    /// Display title; defaults to the guid when the remote has none
    pub title: String,

    /// Body text taken from the remote description or summary
    pub body: String,

    /// Stable remote identifier; empty for manually curated posts
    pub guid: String,

    /// Remote library this record belongs to
    pub library_id: String,

    /// Serialized copy of the full remote record
    pub raw_metadata: String,

    /// Publication status; synced records are always "published"
    pub status: String,

    /// Creation time (Unix seconds)
    pub created_at: i64,

    /// Last update time (Unix seconds)
    pub updated_at: i64,
}

impl VideoPost {
    /// Publication status applied to every synced record
    pub const STATUS_PUBLISHED: &'static str = "published";

    /// Create a new published record with a fresh local id
    pub fn new(
        title: impl Into<String>,
        body: impl Into<String>,
        guid: impl Into<String>,
        library_id: impl Into<String>,
        raw_metadata: impl Into<String>,
        now: i64,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            body: body.into(),
            guid: guid.into(),
            library_id: library_id.into(),
            raw_metadata: raw_metadata.into(),
            status: Self::STATUS_PUBLISHED.to_string(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// A thumbnail image attached to one video post.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Thumbnail {
    /// Locally owned identifier
    pub id: String,

    /// The post this thumbnail belongs to; one thumbnail per post
    pub post_id: String,

    /// Original file name, `{guid}.jpg`
    pub file_name: String,

    /// MIME type of the stored bytes
    pub mime_type: String,

    /// Raw image bytes
    pub data: Vec<u8>,

    /// Creation time (Unix seconds)
    pub created_at: i64,
}

impl Thumbnail {
    pub fn new(
        post_id: impl Into<String>,
        file_name: impl Into<String>,
        mime_type: impl Into<String>,
        data: Vec<u8>,
        now: i64,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            post_id: post_id.into(),
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            data,
            created_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_video_post_is_published() {
        let post = VideoPost::new("Intro", "body", "g1", "lib", "{}", 100);

        assert_eq!(post.status, VideoPost::STATUS_PUBLISHED);
        assert_eq!(post.created_at, 100);
        assert_eq!(post.updated_at, 100);
        assert!(!post.id.is_empty());
    }

    #[test]
    fn test_new_posts_get_distinct_ids() {
        let a = VideoPost::new("a", "", "g1", "lib", "{}", 0);
        let b = VideoPost::new("b", "", "g2", "lib", "{}", 0);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_new_thumbnail() {
        let thumb = Thumbnail::new("post-1", "g1.jpg", "image/jpeg", vec![1, 2, 3], 42);

        assert_eq!(thumb.post_id, "post-1");
        assert_eq!(thumb.file_name, "g1.jpg");
        assert_eq!(thumb.data, vec![1, 2, 3]);
        assert_eq!(thumb.created_at, 42);
    }
}
