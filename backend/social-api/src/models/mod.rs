//! Data structures for users, posts, and comments

pub mod comment;
pub mod post;
pub mod user;

pub use comment::{Comment, NewComment};
pub use post::{NewPost, Post};
pub use user::{NewUser, Role, SessionRecord, User};

/// Uniform soft-delete capability.
///
/// Every resource that can be soft-deleted answers liveness through this
/// trait; authorization checks query it once instead of inspecting
/// per-entity flags.
pub trait Lifecycle {
    fn is_active(&self) -> bool;
}
