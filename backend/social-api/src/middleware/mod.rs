//! HTTP middleware utilities
//!
//! Authentication is explicit: handlers extract the raw bearer string with
//! [`BearerToken`] and call `AuthService::authenticate` themselves, threading
//! the resolved identity into service calls. Nothing is attached to the
//! request behind the handler's back.

use crate::error::AppError;
use actix_web::{dev::Payload, FromRequest, HttpRequest};
use std::future::{ready, Ready};

/// Raw bearer credential pulled from the `Authorization` header.
#[derive(Debug, Clone)]
pub struct BearerToken(String);

impl BearerToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromRequest for BearerToken {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let token = req
            .headers()
            .get("Authorization")
            .and_then(|h| h.to_str().ok())
            .and_then(|h| h.strip_prefix("Bearer "))
            .map(|t| t.trim().to_string());

        // A missing or malformed header is the same uniform rejection as a
        // bad token.
        ready(match token {
            Some(token) if !token.is_empty() => Ok(BearerToken(token)),
            _ => Err(AppError::Unauthenticated),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[actix_web::test]
    async fn extracts_bearer_token() {
        let req = TestRequest::default()
            .insert_header(("Authorization", "Bearer abc.def.ghi"))
            .to_http_request();
        let token = BearerToken::extract(&req).await.unwrap();
        assert_eq!(token.as_str(), "abc.def.ghi");
    }

    #[actix_web::test]
    async fn missing_or_malformed_header_is_unauthenticated() {
        let bare = TestRequest::default().to_http_request();
        assert!(BearerToken::extract(&bare).await.is_err());

        let basic = TestRequest::default()
            .insert_header(("Authorization", "Basic dXNlcjpwYXNz"))
            .to_http_request();
        assert!(BearerToken::extract(&basic).await.is_err());

        let empty = TestRequest::default()
            .insert_header(("Authorization", "Bearer "))
            .to_http_request();
        assert!(BearerToken::extract(&empty).await.is_err());
    }
}
