//! Post database operations

use crate::db::PostStore;
use crate::error::Result;
use crate::models::{NewPost, Post};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

/// Postgres-backed post repository.
#[derive(Clone)]
pub struct PgPostStore {
    pool: PgPool,
}

impl PgPostStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn order_clause(newest_first: bool) -> &'static str {
    if newest_first {
        "DESC"
    } else {
        "ASC"
    }
}

#[async_trait]
impl PostStore for PgPostStore {
    async fn insert(&self, post: NewPost) -> Result<Post> {
        let now = Utc::now();

        let inserted = sqlx::query_as::<_, Post>(
            r#"
            INSERT INTO posts (id, title, content, created_by, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $5)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&post.title)
        .bind(&post.content)
        .bind(post.created_by)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(inserted)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>> {
        let post = sqlx::query_as::<_, Post>("SELECT * FROM posts WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(post)
    }

    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<Post>> {
        let posts = sqlx::query_as::<_, Post>(
            r#"
            SELECT * FROM posts
            WHERE deleted_at IS NULL
            ORDER BY created_at DESC
            OFFSET $1 LIMIT $2
            "#,
        )
        .bind(offset)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(posts)
    }

    async fn list_by_author(
        &self,
        author: Uuid,
        offset: i64,
        limit: i64,
        newest_first: bool,
    ) -> Result<Vec<Post>> {
        let query = format!(
            r#"
            SELECT * FROM posts
            WHERE created_by = $1 AND deleted_at IS NULL
            ORDER BY created_at {}
            OFFSET $2 LIMIT $3
            "#,
            order_clause(newest_first)
        );

        let posts = sqlx::query_as::<_, Post>(&query)
            .bind(author)
            .bind(offset)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;

        Ok(posts)
    }

    async fn list_by_authors(
        &self,
        authors: &[Uuid],
        offset: i64,
        limit: i64,
        newest_first: bool,
    ) -> Result<Vec<Post>> {
        let query = format!(
            r#"
            SELECT * FROM posts
            WHERE created_by = ANY($1) AND deleted_at IS NULL
            ORDER BY created_at {}
            OFFSET $2 LIMIT $3
            "#,
            order_clause(newest_first)
        );

        let posts = sqlx::query_as::<_, Post>(&query)
            .bind(authors)
            .bind(offset)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;

        Ok(posts)
    }

    async fn save(&self, post: &Post) -> Result<()> {
        sqlx::query("UPDATE posts SET title = $1, content = $2, updated_at = $3 WHERE id = $4")
            .bind(&post.title)
            .bind(&post.content)
            .bind(Utc::now())
            .bind(post.id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn soft_delete(&self, id: Uuid) -> Result<()> {
        let now = Utc::now();

        sqlx::query("UPDATE posts SET deleted_at = $1, updated_at = $1 WHERE id = $2")
            .bind(now)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn like(&self, post_id: Uuid, user_id: Uuid) -> Result<bool> {
        let result = sqlx::query(
            r#"
            INSERT INTO post_likes (post_id, user_id, created_at)
            VALUES ($1, $2, $3)
            ON CONFLICT (post_id, user_id) DO NOTHING
            "#,
        )
        .bind(post_id)
        .bind(user_id)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn unlike(&self, post_id: Uuid, user_id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM post_likes WHERE post_id = $1 AND user_id = $2")
            .bind(post_id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
