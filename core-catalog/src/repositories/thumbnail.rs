//! Thumbnail repository trait and implementation

use crate::error::Result;
use crate::models::Thumbnail;
use async_trait::async_trait;
use sqlx::{query, query_as, SqlitePool};

/// Thumbnail repository interface for data access operations
#[async_trait]
pub trait ThumbnailRepository: Send + Sync {
    /// Store a thumbnail for a post.
    ///
    /// # Errors
    /// Returns an error if the post already has a thumbnail or the
    /// referenced post does not exist.
    async fn attach(&self, thumbnail: &Thumbnail) -> Result<()>;

    /// Check whether a post already has a thumbnail
    async fn exists_for_post(&self, post_id: &str) -> Result<bool>;

    /// Find the thumbnail attached to a post
    async fn find_by_post(&self, post_id: &str) -> Result<Option<Thumbnail>>;

    /// Count stored thumbnails
    async fn count(&self) -> Result<i64>;
}

/// SQLite implementation of ThumbnailRepository
pub struct SqliteThumbnailRepository {
    pool: SqlitePool,
}

impl SqliteThumbnailRepository {
    /// Create a new SqliteThumbnailRepository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ThumbnailRepository for SqliteThumbnailRepository {
    async fn attach(&self, thumbnail: &Thumbnail) -> Result<()> {
        query(
            r#"
            INSERT INTO thumbnails (id, post_id, file_name, mime_type, data, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&thumbnail.id)
        .bind(&thumbnail.post_id)
        .bind(&thumbnail.file_name)
        .bind(&thumbnail.mime_type)
        .bind(&thumbnail.data)
        .bind(thumbnail.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn exists_for_post(&self, post_id: &str) -> Result<bool> {
        let count: (i64,) = query_as("SELECT COUNT(*) FROM thumbnails WHERE post_id = ?")
            .bind(post_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0 > 0)
    }

    async fn find_by_post(&self, post_id: &str) -> Result<Option<Thumbnail>> {
        let thumbnail = query_as::<_, Thumbnail>("SELECT * FROM thumbnails WHERE post_id = ?")
            .bind(post_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(thumbnail)
    }

    async fn count(&self) -> Result<i64> {
        let count: (i64,) = query_as("SELECT COUNT(*) FROM thumbnails")
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }
}
