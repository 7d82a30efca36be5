//! Authentication endpoints

use crate::error::Result;
use crate::handlers::AppState;
use crate::middleware::BearerToken;
use crate::models::Role;
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct SignupRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8, max = 72))]
    pub password: String,
    pub role: Option<Role>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// POST /auth/signup
pub async fn signup(
    state: web::Data<AppState>,
    req: web::Json<SignupRequest>,
) -> Result<HttpResponse> {
    req.validate()?;

    let id = state
        .auth
        .signup(&req.name, &req.email, &req.password, req.role)
        .await?;

    Ok(HttpResponse::Created().json(serde_json::json!({ "id": id })))
}

/// POST /auth/login
pub async fn login(
    state: web::Data<AppState>,
    req: web::Json<LoginRequest>,
) -> Result<HttpResponse> {
    req.validate()?;

    let token = state.auth.login(&req.email, &req.password).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "token": token })))
}

/// POST /auth/logout
pub async fn logout(state: web::Data<AppState>, token: BearerToken) -> Result<HttpResponse> {
    let actor = state.auth.authenticate(token.as_str()).await?;
    state.auth.logout(&actor, token.as_str()).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "Logout successful" })))
}

/// POST /auth/logout_all
pub async fn logout_all(state: web::Data<AppState>, token: BearerToken) -> Result<HttpResponse> {
    let actor = state.auth.authenticate(token.as_str()).await?;
    state.auth.logout_all(actor.id).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "Logout successful" })))
}
