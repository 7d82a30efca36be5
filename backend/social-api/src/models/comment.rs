use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

use super::Lifecycle;

/// Comment model
///
/// A reply is a comment with `parent_comment_id` set; it always belongs to
/// the same post as its parent.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Comment {
    pub id: Uuid,
    pub content: String,
    pub created_by: Uuid,
    pub post_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_comment_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing)]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Lifecycle for Comment {
    fn is_active(&self) -> bool {
        self.deleted_at.is_none()
    }
}

/// Fields required to create a comment record.
#[derive(Debug, Clone)]
pub struct NewComment {
    pub content: String,
    pub created_by: Uuid,
    pub post_id: Uuid,
    pub parent_comment_id: Option<Uuid>,
}
