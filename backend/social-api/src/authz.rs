//! Authorization predicates
//!
//! Pure, total functions over the resolved caller, the target resource's
//! ownership fact, and its lifecycle state. No predicate performs I/O or
//! fails; callers translate `false` into the transport-appropriate
//! rejection.

use serde::Serialize;
use uuid::Uuid;

use crate::models::{Role, User};

/// Request-scoped view of the authenticated caller.
///
/// Derived fresh from the identity record on every request; never persisted
/// and never cached across requests.
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedIdentity {
    pub id: Uuid,
    pub role: Role,
    pub paid: bool,
    pub email: String,
}

impl From<&User> for ResolvedIdentity {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            role: user.role,
            paid: user.paid,
            email: user.email.clone(),
        }
    }
}

/// Mutating actions a caller can attempt on an owned resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Edit,
    Delete,
}

/// May `actor` mutate the resource owned by `owner_id`?
///
/// Owners may edit and delete their own live resources. Moderators may
/// additionally delete any live resource, regardless of ownership; they get
/// no edit rights from their role.
pub fn can_mutate(
    actor: &ResolvedIdentity,
    owner_id: Uuid,
    resource_active: bool,
    action: Action,
) -> bool {
    if !resource_active {
        return false;
    }
    match action {
        Action::Edit => actor.id == owner_id,
        Action::Delete => match actor.role {
            Role::Moderator => true,
            Role::User => actor.id == owner_id,
        },
    }
}

/// May `actor` author a new post?
///
/// Moderators are read/moderate-only and never authors.
pub fn can_create_post(actor: &ResolvedIdentity) -> bool {
    match actor.role {
        Role::Moderator => false,
        Role::User => true,
    }
}

/// May `actor` read the personalized feed?
///
/// The feed is a monetization gate keyed on the paid flag, independent of
/// role.
pub fn can_view_feed(actor: &ResolvedIdentity) -> bool {
    actor.paid
}

/// May `actor` read the comments under a resource owned by `owner_id`?
///
/// `follows_owner` is the only relation fact the caller must supply: whether
/// the actor appears in the owner's follower relation.
pub fn can_view_comments(
    actor: &ResolvedIdentity,
    owner_id: Uuid,
    follows_owner: bool,
    resource_active: bool,
) -> bool {
    if !resource_active {
        return false;
    }
    actor.id == owner_id || follows_owner
}
