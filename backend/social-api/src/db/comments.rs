//! Comment database operations

use crate::db::CommentStore;
use crate::error::Result;
use crate::models::{Comment, NewComment};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

/// Postgres-backed comment repository.
#[derive(Clone)]
pub struct PgCommentStore {
    pool: PgPool,
}

impl PgCommentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CommentStore for PgCommentStore {
    async fn insert(&self, comment: NewComment) -> Result<Comment> {
        let now = Utc::now();

        let inserted = sqlx::query_as::<_, Comment>(
            r#"
            INSERT INTO comments (id, content, created_by, post_id, parent_comment_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $6)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&comment.content)
        .bind(comment.created_by)
        .bind(comment.post_id)
        .bind(comment.parent_comment_id)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(inserted)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Comment>> {
        let comment = sqlx::query_as::<_, Comment>("SELECT * FROM comments WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(comment)
    }

    async fn list_for_post(&self, post_id: Uuid) -> Result<Vec<Comment>> {
        let comments = sqlx::query_as::<_, Comment>(
            r#"
            SELECT * FROM comments
            WHERE post_id = $1 AND parent_comment_id IS NULL AND deleted_at IS NULL
            ORDER BY created_at
            "#,
        )
        .bind(post_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(comments)
    }

    async fn list_replies(&self, parent_id: Uuid) -> Result<Vec<Comment>> {
        let replies = sqlx::query_as::<_, Comment>(
            r#"
            SELECT * FROM comments
            WHERE parent_comment_id = $1 AND deleted_at IS NULL
            ORDER BY created_at
            "#,
        )
        .bind(parent_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(replies)
    }

    async fn soft_delete(&self, id: Uuid) -> Result<()> {
        let now = Utc::now();

        sqlx::query("UPDATE comments SET deleted_at = $1, updated_at = $1 WHERE id = $2")
            .bind(now)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
