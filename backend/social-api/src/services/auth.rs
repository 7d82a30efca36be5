//! Authentication service
//!
//! Owns the login/signup/logout flows and per-request identity resolution.
//! Every token-related failure collapses into `AppError::Unauthenticated`;
//! the specific reason is logged, never surfaced, so callers cannot probe
//! which defense rejected them.

use crate::authz::ResolvedIdentity;
use crate::db::{DynSessionStore, DynUserStore};
use crate::error::{AppError, Result};
use crate::models::{Lifecycle, NewUser, Role};
use crate::security::{hash_password, hash_token, verify_password};
use auth_core::{Clock, TokenCodec, TokenError};
use std::sync::Arc;
use uuid::Uuid;

#[derive(Clone)]
pub struct AuthService {
    users: DynUserStore,
    sessions: DynSessionStore,
    codec: Arc<TokenCodec>,
    clock: Arc<dyn Clock>,
}

impl AuthService {
    pub fn new(
        users: DynUserStore,
        sessions: DynSessionStore,
        codec: Arc<TokenCodec>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            users,
            sessions,
            codec,
            clock,
        }
    }

    /// Register a new identity.
    ///
    /// Emails are case-normalized before the uniqueness check. The password
    /// digest is created here and never leaves the store boundary again.
    pub async fn signup(
        &self,
        name: &str,
        email: &str,
        password: &str,
        role: Option<Role>,
    ) -> Result<Uuid> {
        let email = email.trim().to_lowercase();

        if self.users.find_by_email(&email).await?.is_some() {
            return Err(AppError::EmailTaken);
        }

        let user = self
            .users
            .insert(NewUser {
                name: name.trim().to_string(),
                email,
                password_hash: hash_password(password)?,
                role: role.unwrap_or(Role::User),
            })
            .await?;

        tracing::info!(user_id = %user.id, "User created");
        Ok(user.id)
    }

    /// Verify credentials and open a new device session.
    ///
    /// Unknown email and wrong password produce the identical error.
    pub async fn login(&self, email: &str, password: &str) -> Result<String> {
        let email = email.trim().to_lowercase();

        let user = match self.users.find_by_email(&email).await? {
            Some(user) => user,
            None => {
                tracing::info!("Login rejected: unknown email");
                return Err(AppError::InvalidCredentials);
            }
        };

        if !verify_password(password, &user.password_hash) {
            tracing::info!(user_id = %user.id, "Login rejected: password mismatch");
            return Err(AppError::InvalidCredentials);
        }

        let now = self.clock.now();
        let token = self
            .codec
            .issue(user.id, user.role.as_str(), now)
            .map_err(|e| AppError::Internal(e.to_string()))?;

        self.sessions.add(user.id, &hash_token(&token), now).await?;

        tracing::info!(user_id = %user.id, "User logged in");
        Ok(token)
    }

    /// Revoke the presented session.
    ///
    /// Idempotent: revoking a token that is already gone is a no-op.
    pub async fn logout(&self, identity: &ResolvedIdentity, raw_token: &str) -> Result<()> {
        let removed = self
            .sessions
            .revoke_one(identity.id, &hash_token(raw_token))
            .await?;

        if removed {
            tracing::info!(user_id = %identity.id, "User logged out");
        } else {
            tracing::debug!(user_id = %identity.id, "Logout for absent session, no-op");
        }
        Ok(())
    }

    /// Revoke every session of the identity, across all devices.
    pub async fn logout_all(&self, identity_id: Uuid) -> Result<()> {
        self.sessions.revoke_all(identity_id).await?;
        tracing::info!(user_id = %identity_id, "User logged out from all devices");
        Ok(())
    }

    /// Resolve the caller behind a presented bearer token.
    ///
    /// Signature and expiry first, then the identity record, then registry
    /// liveness. A token that decodes but was revoked is as unauthenticated
    /// as a forged one.
    pub async fn authenticate(&self, raw_token: &str) -> Result<ResolvedIdentity> {
        let now = self.clock.now();

        let claims = self.codec.decode(raw_token, now).map_err(|e| {
            match e {
                TokenError::Expired => tracing::info!("Token rejected: expired"),
                reason => tracing::warn!("Token rejected: {}", reason),
            }
            AppError::Unauthenticated
        })?;

        let user_id = claims.subject_id().ok_or_else(|| {
            tracing::warn!("Token rejected: non-UUID subject claim");
            AppError::Unauthenticated
        })?;

        let user = match self.users.find_by_id(user_id).await? {
            Some(user) if user.is_active() => user,
            _ => {
                tracing::info!(user_id = %user_id, "Token rejected: unknown or deleted identity");
                return Err(AppError::Unauthenticated);
            }
        };

        if !self
            .sessions
            .is_live(user.id, &hash_token(raw_token))
            .await?
        {
            tracing::info!(user_id = %user.id, "Token rejected: session revoked");
            return Err(AppError::Unauthenticated);
        }

        Ok(ResolvedIdentity::from(&user))
    }
}
