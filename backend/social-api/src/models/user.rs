use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

use super::Lifecycle;

/// Role enum matching database user_role
///
/// Closed set: an unrecognized role claim is a rejection, never a silent
/// fallthrough.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type)]
#[sqlx(type_name = "user_role", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    User,
    Moderator,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "USER",
            Role::Moderator => "MODERATOR",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "USER" => Some(Role::User),
            "MODERATOR" => Some(Role::Moderator),
            _ => None,
        }
    }
}

/// User model - core identity entity
///
/// The password hash never leaves the store boundary in serialized form.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: Role,
    pub paid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_ref: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing)]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl User {
    /// Check if user is soft-deleted
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

impl Lifecycle for User {
    fn is_active(&self) -> bool {
        self.deleted_at.is_none()
    }
}

/// Fields required to create a user record.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
}

/// A live session record attached to a user.
///
/// `token_hash` is the SHA-256 of the issued token; raw token values are
/// never persisted.
#[derive(Debug, Clone, FromRow)]
pub struct SessionRecord {
    pub user_id: Uuid,
    pub token_hash: String,
    pub issued_at: DateTime<Utc>,
}
