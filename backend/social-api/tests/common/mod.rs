//! In-memory store doubles and a controllable clock for integration tests.
#![allow(dead_code)]

use async_trait::async_trait;
use auth_core::{Clock, TokenCodec};
use chrono::{DateTime, Duration, Utc};
use social_api::authz::ResolvedIdentity;
use social_api::db::{CommentStore, PostStore, SessionStore, UserStore};
use social_api::error::{AppError, Result};
use social_api::models::{Comment, NewComment, NewPost, NewUser, Post, User};
use social_api::services::{
    AuthService, CardDetails, ChargeError, ChargeGateway, ChargeReceipt, CommentService,
    PostService, UserService,
};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

pub const TOKEN_TTL_SECS: i64 = 3600;

/// Clock whose time the test advances by hand.
pub struct MockClock {
    now: Mutex<DateTime<Utc>>,
}

impl MockClock {
    pub fn new() -> Self {
        Self {
            now: Mutex::new(Utc::now()),
        }
    }

    pub fn advance(&self, duration: Duration) {
        let mut now = self.now.lock().unwrap();
        *now += duration;
    }
}

impl Clock for MockClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}

#[derive(Default)]
pub struct InMemoryUserStore {
    users: Mutex<Vec<User>>,
    follows: Mutex<HashSet<(Uuid, Uuid)>>,
}

impl InMemoryUserStore {
    /// Flip a user's role in place, for moderator scenarios.
    pub fn set_role(&self, id: Uuid, role: social_api::models::Role) {
        let mut users = self.users.lock().unwrap();
        if let Some(user) = users.iter_mut().find(|u| u.id == id) {
            user.role = role;
        }
    }

    pub fn mark_paid(&self, id: Uuid) {
        let mut users = self.users.lock().unwrap();
        if let Some(user) = users.iter_mut().find(|u| u.id == id) {
            user.paid = true;
        }
    }

    pub fn soft_delete(&self, id: Uuid) {
        let mut users = self.users.lock().unwrap();
        if let Some(user) = users.iter_mut().find(|u| u.id == id) {
            user.deleted_at = Some(Utc::now());
        }
    }

    pub fn paid_flag(&self, id: Uuid) -> Option<bool> {
        let users = self.users.lock().unwrap();
        users.iter().find(|u| u.id == id).map(|u| u.paid)
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let users = self.users.lock().unwrap();
        Ok(users
            .iter()
            .find(|u| u.email == email && u.deleted_at.is_none())
            .cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>> {
        let users = self.users.lock().unwrap();
        Ok(users
            .iter()
            .find(|u| u.id == id && u.deleted_at.is_none())
            .cloned())
    }

    async fn insert(&self, user: NewUser) -> Result<User> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email == user.email) {
            return Err(AppError::EmailTaken);
        }
        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            name: user.name,
            email: user.email,
            password_hash: user.password_hash,
            role: user.role,
            paid: false,
            payment_ref: None,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        users.push(user.clone());
        Ok(user)
    }

    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<User>> {
        let users = self.users.lock().unwrap();
        Ok(users
            .iter()
            .filter(|u| u.deleted_at.is_none())
            .skip(offset as usize)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn list_by_ids(&self, ids: &[Uuid]) -> Result<Vec<User>> {
        let users = self.users.lock().unwrap();
        Ok(users
            .iter()
            .filter(|u| ids.contains(&u.id) && u.deleted_at.is_none())
            .cloned()
            .collect())
    }

    async fn set_paid(&self, id: Uuid, payment_ref: &str) -> Result<()> {
        let mut users = self.users.lock().unwrap();
        if let Some(user) = users.iter_mut().find(|u| u.id == id) {
            user.paid = true;
            user.payment_ref = Some(payment_ref.to_string());
        }
        Ok(())
    }

    async fn follow(&self, follower: Uuid, followee: Uuid) -> Result<bool> {
        let mut follows = self.follows.lock().unwrap();
        Ok(follows.insert((follower, followee)))
    }

    async fn unfollow(&self, follower: Uuid, followee: Uuid) -> Result<bool> {
        let mut follows = self.follows.lock().unwrap();
        Ok(follows.remove(&(follower, followee)))
    }

    async fn is_following(&self, follower: Uuid, followee: Uuid) -> Result<bool> {
        let follows = self.follows.lock().unwrap();
        Ok(follows.contains(&(follower, followee)))
    }

    async fn followed_ids(&self, follower: Uuid) -> Result<Vec<Uuid>> {
        let follows = self.follows.lock().unwrap();
        Ok(follows
            .iter()
            .filter(|(f, _)| *f == follower)
            .map(|(_, followee)| *followee)
            .collect())
    }
}

#[derive(Default)]
pub struct InMemorySessionStore {
    sessions: Mutex<Vec<(Uuid, String, DateTime<Utc>)>>,
}

impl InMemorySessionStore {
    pub fn session_count(&self, user_id: Uuid) -> usize {
        let sessions = self.sessions.lock().unwrap();
        sessions.iter().filter(|(id, _, _)| *id == user_id).count()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn add(&self, user_id: Uuid, token_hash: &str, issued_at: DateTime<Utc>) -> Result<()> {
        let mut sessions = self.sessions.lock().unwrap();
        sessions.push((user_id, token_hash.to_string(), issued_at));
        Ok(())
    }

    async fn revoke_one(&self, user_id: Uuid, token_hash: &str) -> Result<bool> {
        let mut sessions = self.sessions.lock().unwrap();
        let before = sessions.len();
        sessions.retain(|(id, hash, _)| !(*id == user_id && hash == token_hash));
        Ok(sessions.len() < before)
    }

    async fn revoke_all(&self, user_id: Uuid) -> Result<()> {
        let mut sessions = self.sessions.lock().unwrap();
        sessions.retain(|(id, _, _)| *id != user_id);
        Ok(())
    }

    async fn is_live(&self, user_id: Uuid, token_hash: &str) -> Result<bool> {
        let sessions = self.sessions.lock().unwrap();
        Ok(sessions
            .iter()
            .any(|(id, hash, _)| *id == user_id && hash == token_hash))
    }
}

#[derive(Default)]
pub struct InMemoryPostStore {
    posts: Mutex<Vec<Post>>,
    likes: Mutex<HashSet<(Uuid, Uuid)>>,
}

#[async_trait]
impl PostStore for InMemoryPostStore {
    async fn insert(&self, post: NewPost) -> Result<Post> {
        let mut posts = self.posts.lock().unwrap();
        let now = Utc::now();
        let post = Post {
            id: Uuid::new_v4(),
            title: post.title,
            content: post.content,
            created_by: post.created_by,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        posts.push(post.clone());
        Ok(post)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>> {
        let posts = self.posts.lock().unwrap();
        Ok(posts.iter().find(|p| p.id == id).cloned())
    }

    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<Post>> {
        let posts = self.posts.lock().unwrap();
        let mut live: Vec<Post> = posts
            .iter()
            .filter(|p| p.deleted_at.is_none())
            .cloned()
            .collect();
        live.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(live
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect())
    }

    async fn list_by_author(
        &self,
        author: Uuid,
        offset: i64,
        limit: i64,
        newest_first: bool,
    ) -> Result<Vec<Post>> {
        self.list_by_authors(&[author], offset, limit, newest_first)
            .await
    }

    async fn list_by_authors(
        &self,
        authors: &[Uuid],
        offset: i64,
        limit: i64,
        newest_first: bool,
    ) -> Result<Vec<Post>> {
        let posts = self.posts.lock().unwrap();
        let mut selected: Vec<Post> = posts
            .iter()
            .filter(|p| authors.contains(&p.created_by) && p.deleted_at.is_none())
            .cloned()
            .collect();
        if newest_first {
            selected.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        } else {
            selected.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        }
        Ok(selected
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect())
    }

    async fn save(&self, post: &Post) -> Result<()> {
        let mut posts = self.posts.lock().unwrap();
        if let Some(existing) = posts.iter_mut().find(|p| p.id == post.id) {
            existing.title = post.title.clone();
            existing.content = post.content.clone();
            existing.updated_at = Utc::now();
        }
        Ok(())
    }

    async fn soft_delete(&self, id: Uuid) -> Result<()> {
        let mut posts = self.posts.lock().unwrap();
        if let Some(post) = posts.iter_mut().find(|p| p.id == id) {
            post.deleted_at = Some(Utc::now());
        }
        Ok(())
    }

    async fn like(&self, post_id: Uuid, user_id: Uuid) -> Result<bool> {
        let mut likes = self.likes.lock().unwrap();
        Ok(likes.insert((post_id, user_id)))
    }

    async fn unlike(&self, post_id: Uuid, user_id: Uuid) -> Result<bool> {
        let mut likes = self.likes.lock().unwrap();
        Ok(likes.remove(&(post_id, user_id)))
    }
}

#[derive(Default)]
pub struct InMemoryCommentStore {
    comments: Mutex<Vec<Comment>>,
}

#[async_trait]
impl CommentStore for InMemoryCommentStore {
    async fn insert(&self, comment: NewComment) -> Result<Comment> {
        let mut comments = self.comments.lock().unwrap();
        let now = Utc::now();
        let comment = Comment {
            id: Uuid::new_v4(),
            content: comment.content,
            created_by: comment.created_by,
            post_id: comment.post_id,
            parent_comment_id: comment.parent_comment_id,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        comments.push(comment.clone());
        Ok(comment)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Comment>> {
        let comments = self.comments.lock().unwrap();
        Ok(comments.iter().find(|c| c.id == id).cloned())
    }

    async fn list_for_post(&self, post_id: Uuid) -> Result<Vec<Comment>> {
        let comments = self.comments.lock().unwrap();
        Ok(comments
            .iter()
            .filter(|c| {
                c.post_id == post_id && c.parent_comment_id.is_none() && c.deleted_at.is_none()
            })
            .cloned()
            .collect())
    }

    async fn list_replies(&self, parent_id: Uuid) -> Result<Vec<Comment>> {
        let comments = self.comments.lock().unwrap();
        Ok(comments
            .iter()
            .filter(|c| c.parent_comment_id == Some(parent_id) && c.deleted_at.is_none())
            .cloned()
            .collect())
    }

    async fn soft_delete(&self, id: Uuid) -> Result<()> {
        let mut comments = self.comments.lock().unwrap();
        if let Some(comment) = comments.iter_mut().find(|c| c.id == id) {
            comment.deleted_at = Some(Utc::now());
        }
        Ok(())
    }
}

/// Gateway double that approves every charge.
pub struct ApprovingGateway;

#[async_trait]
impl ChargeGateway for ApprovingGateway {
    async fn charge(
        &self,
        _card: &CardDetails,
        _amount_cents: i64,
        _currency: &str,
    ) -> std::result::Result<ChargeReceipt, ChargeError> {
        Ok(ChargeReceipt {
            reference: "ch_test_ok".to_string(),
        })
    }
}

pub struct TestEnv {
    pub auth: AuthService,
    pub posts: PostService,
    pub comments: CommentService,
    pub users: UserService,
    pub user_store: Arc<InMemoryUserStore>,
    pub session_store: Arc<InMemorySessionStore>,
    pub post_store: Arc<InMemoryPostStore>,
    pub clock: Arc<MockClock>,
}

pub fn test_env() -> TestEnv {
    let user_store = Arc::new(InMemoryUserStore::default());
    let session_store = Arc::new(InMemorySessionStore::default());
    let post_store = Arc::new(InMemoryPostStore::default());
    let comment_store = Arc::new(InMemoryCommentStore::default());
    let clock = Arc::new(MockClock::new());
    let codec = Arc::new(TokenCodec::new(
        b"integration-test-secret-32-bytes",
        TOKEN_TTL_SECS,
    ));

    TestEnv {
        auth: AuthService::new(
            user_store.clone(),
            session_store.clone(),
            codec,
            clock.clone(),
        ),
        posts: PostService::new(post_store.clone(), user_store.clone()),
        comments: CommentService::new(comment_store, post_store.clone(), user_store.clone()),
        users: UserService::new(user_store.clone(), Arc::new(ApprovingGateway)),
        user_store,
        session_store,
        post_store,
        clock,
    }
}

/// Signup + login in one step, returning the resolved identity and token.
pub async fn signed_up_user(env: &TestEnv, name: &str, email: &str) -> (ResolvedIdentity, String) {
    env.auth
        .signup(name, email, "secret123", None)
        .await
        .expect("signup should succeed");
    let token = env
        .auth
        .login(email, "secret123")
        .await
        .expect("login should succeed");
    let identity = env
        .auth
        .authenticate(&token)
        .await
        .expect("fresh token should authenticate");
    (identity, token)
}
