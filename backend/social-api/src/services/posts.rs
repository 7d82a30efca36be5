//! Post business logic

use crate::authz::{self, Action, ResolvedIdentity};
use crate::db::{DynPostStore, DynUserStore};
use crate::error::{AppError, Result};
use crate::models::{Lifecycle, NewPost, Post};
use uuid::Uuid;

#[derive(Clone)]
pub struct PostService {
    posts: DynPostStore,
    users: DynUserStore,
}

impl PostService {
    pub fn new(posts: DynPostStore, users: DynUserStore) -> Self {
        Self { posts, users }
    }

    /// Create a post. Moderators are never authors.
    pub async fn create(&self, actor: &ResolvedIdentity, title: &str, content: &str) -> Result<Post> {
        if !authz::can_create_post(actor) {
            return Err(AppError::Forbidden("Moderators cannot create posts".into()));
        }

        let post = self
            .posts
            .insert(NewPost {
                title: title.trim().to_string(),
                content: content.trim().to_string(),
                created_by: actor.id,
            })
            .await?;

        tracing::info!(post_id = %post.id, user_id = %actor.id, "Post created");
        Ok(post)
    }

    pub async fn get(&self, post_id: Uuid) -> Result<Post> {
        self.load_active(post_id).await
    }

    /// Page through live posts, newest first.
    pub async fn list(&self, offset: i64, limit: i64) -> Result<Vec<Post>> {
        self.posts.list(offset, limit).await
    }

    /// Edit title and/or content. Owner only.
    pub async fn update(
        &self,
        actor: &ResolvedIdentity,
        post_id: Uuid,
        title: Option<&str>,
        content: Option<&str>,
    ) -> Result<Post> {
        let mut post = self.load_active(post_id).await?;

        if !authz::can_mutate(actor, post.created_by, post.is_active(), Action::Edit) {
            return Err(AppError::Forbidden("Only the author may edit this post".into()));
        }

        if let Some(title) = title {
            post.title = title.trim().to_string();
        }
        if let Some(content) = content {
            post.content = content.trim().to_string();
        }
        self.posts.save(&post).await?;

        tracing::info!(post_id = %post.id, user_id = %actor.id, "Post updated");
        Ok(post)
    }

    /// Soft-delete a post. Owner or moderator.
    pub async fn delete(&self, actor: &ResolvedIdentity, post_id: Uuid) -> Result<()> {
        let post = self.load_active(post_id).await?;

        if !authz::can_mutate(actor, post.created_by, post.is_active(), Action::Delete) {
            return Err(AppError::Forbidden(
                "Only the author or a moderator may delete this post".into(),
            ));
        }

        self.posts.soft_delete(post.id).await?;
        tracing::info!(post_id = %post.id, user_id = %actor.id, "Post deleted");
        Ok(())
    }

    pub async fn list_by_author(
        &self,
        author: Uuid,
        offset: i64,
        limit: i64,
        newest_first: bool,
    ) -> Result<Vec<Post>> {
        self.posts
            .list_by_author(author, offset, limit, newest_first)
            .await
    }

    /// Posts from the identities the actor follows. Paid accounts only.
    pub async fn feed(
        &self,
        actor: &ResolvedIdentity,
        offset: i64,
        limit: i64,
        newest_first: bool,
    ) -> Result<Vec<Post>> {
        if !authz::can_view_feed(actor) {
            return Err(AppError::Forbidden(
                "Please upgrade your account to see the feed".into(),
            ));
        }

        let followed = self.users.followed_ids(actor.id).await?;
        if followed.is_empty() {
            return Ok(Vec::new());
        }

        self.posts
            .list_by_authors(&followed, offset, limit, newest_first)
            .await
    }

    pub async fn like(&self, actor: &ResolvedIdentity, post_id: Uuid) -> Result<()> {
        let post = self.load_active(post_id).await?;

        if !self.posts.like(post.id, actor.id).await? {
            return Err(AppError::Conflict("Post already liked".into()));
        }
        Ok(())
    }

    pub async fn unlike(&self, actor: &ResolvedIdentity, post_id: Uuid) -> Result<()> {
        let post = self.load_active(post_id).await?;

        if !self.posts.unlike(post.id, actor.id).await? {
            return Err(AppError::Conflict("Post not liked".into()));
        }
        Ok(())
    }

    async fn load_active(&self, post_id: Uuid) -> Result<Post> {
        match self.posts.find_by_id(post_id).await? {
            Some(post) if post.is_active() => Ok(post),
            _ => Err(AppError::NotFound("Post not found".into())),
        }
    }
}
