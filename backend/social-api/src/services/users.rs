//! User business logic: profiles, the follow relation, and the paid upgrade

use crate::authz::ResolvedIdentity;
use crate::db::DynUserStore;
use crate::error::{AppError, Result};
use crate::models::User;
use crate::services::payments::{CardDetails, ChargeError, ChargeGateway};
use std::sync::Arc;
use uuid::Uuid;

/// Price of the feed upgrade, in cents.
const UPGRADE_PRICE_CENTS: i64 = 999;
const UPGRADE_CURRENCY: &str = "usd";

#[derive(Clone)]
pub struct UserService {
    users: DynUserStore,
    gateway: Arc<dyn ChargeGateway>,
}

impl UserService {
    pub fn new(users: DynUserStore, gateway: Arc<dyn ChargeGateway>) -> Self {
        Self { users, gateway }
    }

    pub async fn list(&self, offset: i64, limit: i64) -> Result<Vec<User>> {
        self.users.list(offset, limit).await
    }

    pub async fn get(&self, user_id: Uuid) -> Result<User> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".into()))
    }

    /// Follow another user. Self-follows and double-follows are rejected.
    pub async fn follow(&self, actor: &ResolvedIdentity, target: Uuid) -> Result<()> {
        if actor.id == target {
            return Err(AppError::Validation("You cannot follow yourself".into()));
        }
        // Target must exist and be live.
        self.get(target).await?;

        if !self.users.follow(actor.id, target).await? {
            return Err(AppError::Conflict("User already followed".into()));
        }

        tracing::info!(user_id = %actor.id, target = %target, "User followed");
        Ok(())
    }

    pub async fn unfollow(&self, actor: &ResolvedIdentity, target: Uuid) -> Result<()> {
        self.get(target).await?;

        if !self.users.unfollow(actor.id, target).await? {
            return Err(AppError::Conflict("User not followed".into()));
        }

        tracing::info!(user_id = %actor.id, target = %target, "User unfollowed");
        Ok(())
    }

    /// The users the actor follows.
    pub async fn followed(&self, actor: &ResolvedIdentity) -> Result<Vec<User>> {
        let ids = self.users.followed_ids(actor.id).await?;
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        self.users.list_by_ids(&ids).await
    }

    /// Charge the upgrade fee and flip the paid flag.
    ///
    /// The paid flag is only set after the gateway yields a receipt; a
    /// declined or unreachable provider leaves the account untouched.
    pub async fn purchase_upgrade(
        &self,
        actor: &ResolvedIdentity,
        card: CardDetails,
    ) -> Result<()> {
        if actor.paid {
            return Err(AppError::Conflict("Account is already upgraded".into()));
        }

        let receipt = self
            .gateway
            .charge(&card, UPGRADE_PRICE_CENTS, UPGRADE_CURRENCY)
            .await
            .map_err(|e| match e {
                ChargeError::Declined(reason) => {
                    tracing::info!(user_id = %actor.id, "Charge declined: {}", reason);
                    AppError::Validation("Payment was declined".into())
                }
                ChargeError::ProviderUnavailable => {
                    tracing::error!(user_id = %actor.id, "Payment provider unavailable");
                    AppError::Internal("Payment provider unavailable".into())
                }
            })?;

        self.users.set_paid(actor.id, &receipt.reference).await?;
        tracing::info!(user_id = %actor.id, "Account upgraded");
        Ok(())
    }
}
