//! Comment endpoints

use crate::error::Result;
use crate::handlers::AppState;
use crate::middleware::BearerToken;
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateCommentRequest {
    #[validate(length(min = 1))]
    pub content: String,
    pub post_id: Uuid,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateReplyRequest {
    #[validate(length(min = 1))]
    pub content: String,
    pub comment_id: Uuid,
}

/// POST /comments
pub async fn create_comment(
    state: web::Data<AppState>,
    token: BearerToken,
    req: web::Json<CreateCommentRequest>,
) -> Result<HttpResponse> {
    req.validate()?;
    let actor = state.auth.authenticate(token.as_str()).await?;
    let comment = state
        .comments
        .create(&actor, req.post_id, &req.content)
        .await?;

    Ok(HttpResponse::Created().json(comment))
}

/// POST /comments/reply
pub async fn create_reply(
    state: web::Data<AppState>,
    token: BearerToken,
    req: web::Json<CreateReplyRequest>,
) -> Result<HttpResponse> {
    req.validate()?;
    let actor = state.auth.authenticate(token.as_str()).await?;
    let reply = state
        .comments
        .reply(&actor, req.comment_id, &req.content)
        .await?;

    Ok(HttpResponse::Created().json(reply))
}

/// GET /comments/{post_id}
pub async fn list_post_comments(
    state: web::Data<AppState>,
    token: BearerToken,
    post_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let actor = state.auth.authenticate(token.as_str()).await?;
    let comments = state.comments.list_for_post(&actor, *post_id).await?;

    Ok(HttpResponse::Ok().json(comments))
}

/// GET /comments/replies/{comment_id}
pub async fn list_comment_replies(
    state: web::Data<AppState>,
    token: BearerToken,
    comment_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let actor = state.auth.authenticate(token.as_str()).await?;
    let replies = state.comments.list_replies(&actor, *comment_id).await?;

    Ok(HttpResponse::Ok().json(replies))
}

/// DELETE /comments/{comment_id}
pub async fn delete_comment(
    state: web::Data<AppState>,
    token: BearerToken,
    comment_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let actor = state.auth.authenticate(token.as_str()).await?;
    state.comments.delete(&actor, *comment_id).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "Comment deleted" })))
}
