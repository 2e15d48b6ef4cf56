//! Video post repository trait and implementation

use crate::error::{CatalogError, Result};
use crate::models::VideoPost;
use async_trait::async_trait;
use sqlx::{query, query_as, SqlitePool};

/// Video post repository interface for data access operations
#[async_trait]
pub trait VideoRepository: Send + Sync {
    /// Find the record for a remote video within one library
    ///
    /// # Returns
    /// - `Ok(Some(post))` if found
    /// - `Ok(None)` if not found
    async fn find_by_guid(&self, library_id: &str, guid: &str) -> Result<Option<VideoPost>>;

    /// Find a post by its local id
    async fn find_by_id(&self, id: &str) -> Result<Option<VideoPost>>;

    /// Insert a new post
    ///
    /// # Errors
    /// Returns an error if a post with the same `(library_id, guid)`
    /// already exists, or on database failure.
    async fn insert(&self, post: &VideoPost) -> Result<()>;

    /// Update an existing post
    ///
    /// # Errors
    /// Returns `NotFound` if the post does not exist.
    async fn update(&self, post: &VideoPost) -> Result<()>;

    /// List every post in the store, across all libraries.
    ///
    /// This is a full-table scan: the orphan sweep is O(local catalog size)
    /// per sync run, which is acceptable at expected catalog sizes.
    async fn list_all(&self) -> Result<Vec<VideoPost>>;

    /// Permanently delete a post by local id (no trash stage)
    ///
    /// # Returns
    /// - `Ok(true)` if a post was deleted
    /// - `Ok(false)` if no post was found
    async fn delete(&self, id: &str) -> Result<bool>;

    /// Count total posts
    async fn count(&self) -> Result<i64>;
}

/// SQLite implementation of VideoRepository
pub struct SqliteVideoRepository {
    pool: SqlitePool,
}

impl SqliteVideoRepository {
    /// Create a new SqliteVideoRepository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VideoRepository for SqliteVideoRepository {
    async fn find_by_guid(&self, library_id: &str, guid: &str) -> Result<Option<VideoPost>> {
        let post = query_as::<_, VideoPost>(
            "SELECT * FROM video_posts WHERE library_id = ? AND guid = ? LIMIT 1",
        )
        .bind(library_id)
        .bind(guid)
        .fetch_optional(&self.pool)
        .await?;

        Ok(post)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<VideoPost>> {
        let post = query_as::<_, VideoPost>("SELECT * FROM video_posts WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(post)
    }

    async fn insert(&self, post: &VideoPost) -> Result<()> {
        query(
            r#"
            INSERT INTO video_posts (
                id, title, body, guid, library_id,
                raw_metadata, status, created_at, updated_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&post.id)
        .bind(&post.title)
        .bind(&post.body)
        .bind(&post.guid)
        .bind(&post.library_id)
        .bind(&post.raw_metadata)
        .bind(&post.status)
        .bind(post.created_at)
        .bind(post.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn update(&self, post: &VideoPost) -> Result<()> {
        let result = query(
            r#"
            UPDATE video_posts
            SET title = ?, body = ?, guid = ?, library_id = ?,
                raw_metadata = ?, status = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&post.title)
        .bind(&post.body)
        .bind(&post.guid)
        .bind(&post.library_id)
        .bind(&post.raw_metadata)
        .bind(&post.status)
        .bind(post.updated_at)
        .bind(&post.id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(CatalogError::NotFound {
                entity_type: "VideoPost".to_string(),
                id: post.id.clone(),
            });
        }

        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<VideoPost>> {
        let posts = query_as::<_, VideoPost>("SELECT * FROM video_posts ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await?;

        Ok(posts)
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        let result = query("DELETE FROM video_posts WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> Result<i64> {
        let count: (i64,) = query_as("SELECT COUNT(*) FROM video_posts")
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::create_test_pool;

    fn post(guid: &str, library_id: &str) -> VideoPost {
        VideoPost::new(
            format!("video {}", guid),
            "body",
            guid,
            library_id,
            "{}",
            1000,
        )
    }

    #[tokio::test]
    async fn test_insert_and_find_by_guid() {
        let pool = create_test_pool().await.unwrap();
        let repo = SqliteVideoRepository::new(pool);

        let p = post("g1", "lib-a");
        repo.insert(&p).await.unwrap();

        let found = repo.find_by_guid("lib-a", "g1").await.unwrap().unwrap();
        assert_eq!(found.id, p.id);
        assert_eq!(found.title, "video g1");
        assert_eq!(found.status, "published");

        assert!(repo.find_by_guid("lib-b", "g1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_guid_unique_per_library() {
        let pool = create_test_pool().await.unwrap();
        let repo = SqliteVideoRepository::new(pool);

        repo.insert(&post("g1", "lib-a")).await.unwrap();

        // Same guid in the same library violates the reconciliation key
        assert!(repo.insert(&post("g1", "lib-a")).await.is_err());

        // Same guid in another library is a distinct record
        repo.insert(&post("g1", "lib-b")).await.unwrap();
        assert_eq!(repo.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_empty_guids_are_unconstrained() {
        let pool = create_test_pool().await.unwrap();
        let repo = SqliteVideoRepository::new(pool);

        // Manually curated posts carry no guid; several may coexist
        repo.insert(&post("", "lib-a")).await.unwrap();
        repo.insert(&post("", "lib-a")).await.unwrap();
        assert_eq!(repo.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_update() {
        let pool = create_test_pool().await.unwrap();
        let repo = SqliteVideoRepository::new(pool);

        let mut p = post("g1", "lib-a");
        repo.insert(&p).await.unwrap();

        p.title = "renamed".to_string();
        p.updated_at = 2000;
        repo.update(&p).await.unwrap();

        let found = repo.find_by_id(&p.id).await.unwrap().unwrap();
        assert_eq!(found.title, "renamed");
        assert_eq!(found.updated_at, 2000);
        assert_eq!(found.created_at, 1000);
    }

    #[tokio::test]
    async fn test_update_missing_post() {
        let pool = create_test_pool().await.unwrap();
        let repo = SqliteVideoRepository::new(pool);

        let result = repo.update(&post("g1", "lib-a")).await;
        assert!(matches!(result, Err(CatalogError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_delete() {
        let pool = create_test_pool().await.unwrap();
        let repo = SqliteVideoRepository::new(pool);

        let p = post("g1", "lib-a");
        repo.insert(&p).await.unwrap();

        assert!(repo.delete(&p.id).await.unwrap());
        assert!(!repo.delete(&p.id).await.unwrap());
        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_list_all_spans_libraries() {
        let pool = create_test_pool().await.unwrap();
        let repo = SqliteVideoRepository::new(pool);

        repo.insert(&post("g1", "lib-a")).await.unwrap();
        repo.insert(&post("g2", "lib-b")).await.unwrap();

        let all = repo.list_all().await.unwrap();
        assert_eq!(all.len(), 2);
    }
}
