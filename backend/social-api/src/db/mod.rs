//! Database access layer
//!
//! Store traits are the seams the core consumes; the `Pg*` repositories in
//! the submodules are the production implementations. Tests supply in-memory
//! implementations of the same traits.

pub mod comments;
pub mod posts;
pub mod sessions;
pub mod users;

pub use comments::PgCommentStore;
pub use posts::PgPostStore;
pub use sessions::PgSessionStore;
pub use users::PgUserStore;

use crate::error::Result;
use crate::models::{Comment, NewComment, NewPost, NewUser, Post, User};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use uuid::Uuid;

pub type DynUserStore = Arc<dyn UserStore>;
pub type DynSessionStore = Arc<dyn SessionStore>;
pub type DynPostStore = Arc<dyn PostStore>;
pub type DynCommentStore = Arc<dyn CommentStore>;

/// Persisted identity records and the follow relation.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Find a user by case-normalized email, excluding soft-deleted users.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;

    /// Find a user by ID, excluding soft-deleted users.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>>;

    /// Insert a new user. Email uniqueness is enforced here.
    async fn insert(&self, user: NewUser) -> Result<User>;

    /// Page through users, oldest first.
    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<User>>;

    /// Batch lookup, excluding soft-deleted users.
    async fn list_by_ids(&self, ids: &[Uuid]) -> Result<Vec<User>>;

    /// Mark a user as paid, recording the charge reference.
    async fn set_paid(&self, id: Uuid, payment_ref: &str) -> Result<()>;

    /// Record `follower` following `followee`. Returns `false` when the
    /// relation already existed.
    async fn follow(&self, follower: Uuid, followee: Uuid) -> Result<bool>;

    /// Remove a follow relation. Returns `false` when it did not exist.
    async fn unfollow(&self, follower: Uuid, followee: Uuid) -> Result<bool>;

    async fn is_following(&self, follower: Uuid, followee: Uuid) -> Result<bool>;

    /// All user IDs that `follower` follows.
    async fn followed_ids(&self, follower: Uuid) -> Result<Vec<Uuid>>;
}

/// Per-identity registry of live session tokens.
///
/// Only token hashes cross this boundary. Each mutation is a single
/// statement, serialized by the store; `revoke_all` is atomic with respect
/// to a concurrent `add` for the same identity.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Append a session record for the identity.
    async fn add(&self, user_id: Uuid, token_hash: &str, issued_at: DateTime<Utc>) -> Result<()>;

    /// Remove the exact matching record. Idempotent: returns `false` when
    /// the token was not present.
    async fn revoke_one(&self, user_id: Uuid, token_hash: &str) -> Result<bool>;

    /// Clear every session for the identity.
    async fn revoke_all(&self, user_id: Uuid) -> Result<()>;

    /// Membership test. A token that decodes validly but is absent here is
    /// unauthenticated; this is what makes logout effective.
    async fn is_live(&self, user_id: Uuid, token_hash: &str) -> Result<bool>;
}

/// Persisted posts and the like relation.
#[async_trait]
pub trait PostStore: Send + Sync {
    async fn insert(&self, post: NewPost) -> Result<Post>;

    /// Find a post by ID, including soft-deleted ones; callers decide how
    /// deleted resources surface.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>>;

    /// Page through live posts, newest first.
    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<Post>>;

    /// Page through one author's live posts.
    async fn list_by_author(
        &self,
        author: Uuid,
        offset: i64,
        limit: i64,
        newest_first: bool,
    ) -> Result<Vec<Post>>;

    /// Page through live posts by any of the given authors (feed query).
    async fn list_by_authors(
        &self,
        authors: &[Uuid],
        offset: i64,
        limit: i64,
        newest_first: bool,
    ) -> Result<Vec<Post>>;

    /// Persist edited title/content.
    async fn save(&self, post: &Post) -> Result<()>;

    async fn soft_delete(&self, id: Uuid) -> Result<()>;

    /// Returns `false` when the user already liked the post.
    async fn like(&self, post_id: Uuid, user_id: Uuid) -> Result<bool>;

    /// Returns `false` when the user had not liked the post.
    async fn unlike(&self, post_id: Uuid, user_id: Uuid) -> Result<bool>;
}

/// Persisted comments and replies.
#[async_trait]
pub trait CommentStore: Send + Sync {
    async fn insert(&self, comment: NewComment) -> Result<Comment>;

    /// Find a comment by ID, including soft-deleted ones.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Comment>>;

    /// Live top-level comments of a post, oldest first.
    async fn list_for_post(&self, post_id: Uuid) -> Result<Vec<Comment>>;

    /// Live replies of a comment, oldest first.
    async fn list_replies(&self, parent_id: Uuid) -> Result<Vec<Comment>>;

    async fn soft_delete(&self, id: Uuid) -> Result<()>;
}
