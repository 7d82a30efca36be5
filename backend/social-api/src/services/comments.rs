//! Comment business logic

use crate::authz::{self, Action, ResolvedIdentity};
use crate::db::{DynCommentStore, DynPostStore, DynUserStore};
use crate::error::{AppError, Result};
use crate::models::{Comment, Lifecycle, NewComment};
use uuid::Uuid;

#[derive(Clone)]
pub struct CommentService {
    comments: DynCommentStore,
    posts: DynPostStore,
    users: DynUserStore,
}

impl CommentService {
    pub fn new(comments: DynCommentStore, posts: DynPostStore, users: DynUserStore) -> Self {
        Self {
            comments,
            posts,
            users,
        }
    }

    /// Comment on a live post.
    pub async fn create(
        &self,
        actor: &ResolvedIdentity,
        post_id: Uuid,
        content: &str,
    ) -> Result<Comment> {
        let post = match self.posts.find_by_id(post_id).await? {
            Some(post) if post.is_active() => post,
            _ => return Err(AppError::NotFound("Post not found".into())),
        };

        let comment = self
            .comments
            .insert(NewComment {
                content: content.trim().to_string(),
                created_by: actor.id,
                post_id: post.id,
                parent_comment_id: None,
            })
            .await?;

        tracing::info!(comment_id = %comment.id, post_id = %post.id, "Comment created");
        Ok(comment)
    }

    /// Reply to a comment. The reply lands on the parent's post.
    pub async fn reply(
        &self,
        actor: &ResolvedIdentity,
        comment_id: Uuid,
        content: &str,
    ) -> Result<Comment> {
        let parent = match self.comments.find_by_id(comment_id).await? {
            Some(parent) => parent,
            None => return Err(AppError::NotFound("Comment not found".into())),
        };
        if !parent.is_active() {
            return Err(AppError::Conflict(
                "Comment has been deleted, you cannot reply to it".into(),
            ));
        }

        let reply = self
            .comments
            .insert(NewComment {
                content: content.trim().to_string(),
                created_by: actor.id,
                post_id: parent.post_id,
                parent_comment_id: Some(parent.id),
            })
            .await?;

        tracing::info!(reply_id = %reply.id, parent_id = %parent.id, "Reply created");
        Ok(reply)
    }

    /// Live top-level comments of a post.
    ///
    /// Visible to the post owner and to identities following the owner.
    pub async fn list_for_post(
        &self,
        actor: &ResolvedIdentity,
        post_id: Uuid,
    ) -> Result<Vec<Comment>> {
        let post = match self.posts.find_by_id(post_id).await? {
            Some(post) => post,
            None => return Err(AppError::NotFound("Post not found".into())),
        };

        let follows_owner = self.users.is_following(actor.id, post.created_by).await?;
        if !authz::can_view_comments(actor, post.created_by, follows_owner, post.is_active()) {
            return Err(AppError::Forbidden(
                "Comments are visible to the author and their followers".into(),
            ));
        }

        self.comments.list_for_post(post.id).await
    }

    /// Live replies of a comment, gated like the comments themselves.
    pub async fn list_replies(
        &self,
        actor: &ResolvedIdentity,
        comment_id: Uuid,
    ) -> Result<Vec<Comment>> {
        let parent = match self.comments.find_by_id(comment_id).await? {
            Some(parent) if parent.is_active() => parent,
            _ => return Err(AppError::NotFound("Comment not found".into())),
        };

        let follows_owner = self.users.is_following(actor.id, parent.created_by).await?;
        if !authz::can_view_comments(actor, parent.created_by, follows_owner, parent.is_active()) {
            return Err(AppError::Forbidden(
                "Replies are visible to the author and their followers".into(),
            ));
        }

        self.comments.list_replies(parent.id).await
    }

    /// Soft-delete a comment. Owner or moderator.
    pub async fn delete(&self, actor: &ResolvedIdentity, comment_id: Uuid) -> Result<()> {
        let comment = match self.comments.find_by_id(comment_id).await? {
            Some(comment) => comment,
            None => return Err(AppError::NotFound("Comment not found".into())),
        };
        if !comment.is_active() {
            return Err(AppError::Conflict("Comment already deleted".into()));
        }

        if !authz::can_mutate(actor, comment.created_by, comment.is_active(), Action::Delete) {
            return Err(AppError::Forbidden(
                "Only the author or a moderator may delete this comment".into(),
            ));
        }

        self.comments.soft_delete(comment.id).await?;
        tracing::info!(comment_id = %comment.id, user_id = %actor.id, "Comment deleted");
        Ok(())
    }
}
