//! HTTP handlers for the social API
//!
//! Protected handlers extract the bearer token, authenticate explicitly, and
//! pass the resolved identity into the service layer.

pub mod auth;
pub mod comments;
pub mod posts;
pub mod users;

use crate::services::{AuthService, CommentService, PostService, UserService};
use serde::Deserialize;

/// Shared application state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub auth: AuthService,
    pub posts: PostService,
    pub comments: CommentService,
    pub users: UserService,
}

const DEFAULT_PAGE_SIZE: i64 = 10;
const MAX_PAGE_SIZE: i64 = 100;

/// Common pagination query: `?page=1&limit=10&desc=true`
#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub desc: Option<bool>,
}

impl PageQuery {
    pub fn limit(&self) -> i64 {
        self.limit
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE)
    }

    pub fn offset(&self) -> i64 {
        // Saturate rather than overflow: an absurd page number yields an
        // offset past the data, which reads back as an empty page.
        (self.page.unwrap_or(1).max(1) - 1).saturating_mul(self.limit())
    }

    pub fn newest_first(&self) -> bool {
        self.desc.unwrap_or(true)
    }
}
