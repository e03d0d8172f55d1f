use crate::domain::error::DomainError;
use crate::domain::post::{NewPost, Post};
use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{error, info};

#[async_trait]
pub trait PostRepository: Send + Sync {
    async fn create(&self, post: NewPost) -> Result<Post, DomainError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, DomainError>;
    /// All posts in insertion order.
    async fn list(&self) -> Result<Vec<Post>, DomainError>;
    /// Rewrites a post owned by `author_id`. `None` when no such row exists.
    async fn update_post(
        &self,
        id: i64,
        author_id: i64,
        title: String,
        content: String,
    ) -> Result<Option<Post>, DomainError>;
    /// Returns whether a row owned by `author_id` was removed.
    async fn delete_post(&self, id: i64, author_id: i64) -> Result<bool, DomainError>;
}

#[derive(Clone)]
pub struct PostgresPostRepository {
    pool: PgPool,
}

impl PostgresPostRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn create(&self, post: NewPost) -> Result<Post, DomainError> {
        let created = sqlx::query_as::<_, Post>(
            r#"
            INSERT INTO posts (author_id, title, content, created_at, updated_at)
            VALUES ($1, $2, $3, NOW(), NOW())
            RETURNING id, author_id, title, content, created_at, updated_at
            "#,
        )
        .bind(post.author_id)
        .bind(&post.title)
        .bind(&post.content)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            error!("failed to create post: {}", e);
            DomainError::Internal(format!("database error: {}", e))
        })?;

        info!(post_id = created.id, author_id = created.author_id, "post created");
        Ok(created)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, DomainError> {
        sqlx::query_as::<_, Post>(
            r#"
            SELECT id, author_id, title, content, created_at, updated_at
            FROM posts WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!("db error find_by_id {}: {}", id, e);
            DomainError::Internal(e.to_string())
        })
    }

    async fn list(&self) -> Result<Vec<Post>, DomainError> {
        sqlx::query_as::<_, Post>(
            r#"
            SELECT id, author_id, title, content, created_at, updated_at
            FROM posts
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!("db error while fetching posts: {}", e);
            DomainError::Internal(e.to_string())
        })
    }

    async fn update_post(
        &self,
        id: i64,
        author_id: i64,
        title: String,
        content: String,
    ) -> Result<Option<Post>, DomainError> {
        let post = sqlx::query_as::<_, Post>(
            r#"
            UPDATE posts
            SET
                title = $1,
                content = $2,
                updated_at = NOW()
            WHERE id = $3 AND author_id = $4
            RETURNING id, author_id, title, content, created_at, updated_at
            "#,
        )
        .bind(title)
        .bind(content)
        .bind(id)
        .bind(author_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!("failed to update post {}: {}", id, e);
            DomainError::Internal(e.to_string())
        })?;

        if post.is_some() {
            info!(post_id = id, "post updated");
        }

        Ok(post)
    }

    async fn delete_post(&self, id: i64, author_id: i64) -> Result<bool, DomainError> {
        let deleted = sqlx::query("DELETE FROM posts WHERE id = $1 AND author_id = $2")
            .bind(id)
            .bind(author_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                error!("failed to delete post {}: {}", id, e);
                DomainError::Internal(e.to_string())
            })?;

        let removed = deleted.rows_affected() > 0;
        if removed {
            info!(post_id = id, "post deleted");
        }
        Ok(removed)
    }
}
