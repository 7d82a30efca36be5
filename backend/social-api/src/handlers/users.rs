//! User endpoints

use crate::error::Result;
use crate::handlers::{AppState, PageQuery};
use crate::middleware::BearerToken;
use crate::services::CardDetails;
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct PaymentRequest {
    #[validate(length(min = 12, max = 19))]
    pub card_number: String,
    #[validate(range(min = 1, max = 12))]
    pub exp_month: u8,
    #[validate(range(min = 2000))]
    pub exp_year: u16,
    #[validate(length(min = 3, max = 4))]
    pub cvc: String,
}

/// GET /users
pub async fn list_users(
    state: web::Data<AppState>,
    page: web::Query<PageQuery>,
) -> Result<HttpResponse> {
    let users = state.users.list(page.offset(), page.limit()).await?;

    Ok(HttpResponse::Ok().json(users))
}

/// GET /users/{id}
pub async fn get_user(state: web::Data<AppState>, user_id: web::Path<Uuid>) -> Result<HttpResponse> {
    let user = state.users.get(*user_id).await?;

    Ok(HttpResponse::Ok().json(user))
}

/// POST /users/follow/{id}
pub async fn follow_user(
    state: web::Data<AppState>,
    token: BearerToken,
    target: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let actor = state.auth.authenticate(token.as_str()).await?;
    state.users.follow(&actor, *target).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "User followed" })))
}

/// POST /users/unfollow/{id}
pub async fn unfollow_user(
    state: web::Data<AppState>,
    token: BearerToken,
    target: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let actor = state.auth.authenticate(token.as_str()).await?;
    state.users.unfollow(&actor, *target).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "User unfollowed" })))
}

/// GET /users/followed
pub async fn followed_users(
    state: web::Data<AppState>,
    token: BearerToken,
) -> Result<HttpResponse> {
    let actor = state.auth.authenticate(token.as_str()).await?;
    let users = state.users.followed(&actor).await?;

    Ok(HttpResponse::Ok().json(users))
}

/// POST /users/payment
pub async fn purchase_upgrade(
    state: web::Data<AppState>,
    token: BearerToken,
    req: web::Json<PaymentRequest>,
) -> Result<HttpResponse> {
    req.validate()?;
    let actor = state.auth.authenticate(token.as_str()).await?;

    let card = CardDetails {
        card_number: req.card_number.clone(),
        exp_month: req.exp_month,
        exp_year: req.exp_year,
        cvc: req.cvc.clone(),
    };
    state.users.purchase_upgrade(&actor, card).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "Account upgraded" })))
}
