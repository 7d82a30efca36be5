//! Session registry database operations

use crate::db::SessionStore;
use crate::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

/// Postgres-backed session registry.
///
/// Rows hold token hashes only. Growth across an identity's lifetime is
/// bounded by the logout paths pruning their rows.
#[derive(Clone)]
pub struct PgSessionStore {
    pool: PgPool,
}

impl PgSessionStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionStore for PgSessionStore {
    async fn add(&self, user_id: Uuid, token_hash: &str, issued_at: DateTime<Utc>) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO sessions (user_id, token_hash, issued_at)
            VALUES ($1, $2, $3)
            ON CONFLICT (user_id, token_hash) DO NOTHING
            "#,
        )
        .bind(user_id)
        .bind(token_hash)
        .bind(issued_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn revoke_one(&self, user_id: Uuid, token_hash: &str) -> Result<bool> {
        let result =
            sqlx::query("DELETE FROM sessions WHERE user_id = $1 AND token_hash = $2")
                .bind(user_id)
                .bind(token_hash)
                .execute(&self.pool)
                .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn revoke_all(&self, user_id: Uuid) -> Result<()> {
        sqlx::query("DELETE FROM sessions WHERE user_id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn is_live(&self, user_id: Uuid, token_hash: &str) -> Result<bool> {
        let found: Option<(i32,)> =
            sqlx::query_as("SELECT 1 FROM sessions WHERE user_id = $1 AND token_hash = $2")
                .bind(user_id)
                .bind(token_hash)
                .fetch_optional(&self.pool)
                .await?;

        Ok(found.is_some())
    }
}
