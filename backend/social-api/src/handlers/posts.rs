//! Post endpoints

use crate::error::Result;
use crate::handlers::{AppState, PageQuery};
use crate::middleware::BearerToken;
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct CreatePostRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(min = 1))]
    pub content: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdatePostRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    #[validate(length(min = 1))]
    pub content: Option<String>,
}

/// GET /posts
pub async fn list_posts(
    state: web::Data<AppState>,
    token: BearerToken,
    page: web::Query<PageQuery>,
) -> Result<HttpResponse> {
    state.auth.authenticate(token.as_str()).await?;
    let posts = state.posts.list(page.offset(), page.limit()).await?;

    Ok(HttpResponse::Ok().json(posts))
}

/// GET /posts/feed
pub async fn feed(
    state: web::Data<AppState>,
    token: BearerToken,
    page: web::Query<PageQuery>,
) -> Result<HttpResponse> {
    let actor = state.auth.authenticate(token.as_str()).await?;
    let posts = state
        .posts
        .feed(&actor, page.offset(), page.limit(), page.newest_first())
        .await?;

    Ok(HttpResponse::Ok().json(posts))
}

/// GET /posts/{id}
pub async fn get_post(
    state: web::Data<AppState>,
    token: BearerToken,
    post_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    state.auth.authenticate(token.as_str()).await?;
    let post = state.posts.get(*post_id).await?;

    Ok(HttpResponse::Ok().json(post))
}

/// POST /posts
pub async fn create_post(
    state: web::Data<AppState>,
    token: BearerToken,
    req: web::Json<CreatePostRequest>,
) -> Result<HttpResponse> {
    req.validate()?;
    let actor = state.auth.authenticate(token.as_str()).await?;
    let post = state.posts.create(&actor, &req.title, &req.content).await?;

    Ok(HttpResponse::Created().json(post))
}

/// PATCH /posts/{id}
pub async fn update_post(
    state: web::Data<AppState>,
    token: BearerToken,
    post_id: web::Path<Uuid>,
    req: web::Json<UpdatePostRequest>,
) -> Result<HttpResponse> {
    req.validate()?;
    let actor = state.auth.authenticate(token.as_str()).await?;
    let post = state
        .posts
        .update(&actor, *post_id, req.title.as_deref(), req.content.as_deref())
        .await?;

    Ok(HttpResponse::Ok().json(post))
}

/// DELETE /posts/{id}
pub async fn delete_post(
    state: web::Data<AppState>,
    token: BearerToken,
    post_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let actor = state.auth.authenticate(token.as_str()).await?;
    state.posts.delete(&actor, *post_id).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "Post deleted" })))
}

/// GET /posts/user/{id}
pub async fn list_posts_by_user(
    state: web::Data<AppState>,
    author: web::Path<Uuid>,
    page: web::Query<PageQuery>,
) -> Result<HttpResponse> {
    let posts = state
        .posts
        .list_by_author(*author, page.offset(), page.limit(), page.newest_first())
        .await?;

    Ok(HttpResponse::Ok().json(posts))
}

/// POST /posts/like/{id}
pub async fn like_post(
    state: web::Data<AppState>,
    token: BearerToken,
    post_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let actor = state.auth.authenticate(token.as_str()).await?;
    state.posts.like(&actor, *post_id).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "Post liked" })))
}

/// POST /posts/unlike/{id}
pub async fn unlike_post(
    state: web::Data<AppState>,
    token: BearerToken,
    post_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let actor = state.auth.authenticate(token.as_str()).await?;
    state.posts.unlike(&actor, *post_id).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "Post unliked" })))
}
