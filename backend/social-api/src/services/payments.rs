//! Opaque charge capability
//!
//! The payment provider is an external collaborator; the service only needs
//! a `charge` seam that either yields a receipt or a terminal failure.

use async_trait::async_trait;

/// Card details forwarded verbatim to the provider. Never persisted.
#[derive(Debug, Clone)]
pub struct CardDetails {
    pub card_number: String,
    pub exp_month: u8,
    pub exp_year: u16,
    pub cvc: String,
}

/// Proof of a successful charge.
#[derive(Debug, Clone)]
pub struct ChargeReceipt {
    /// Provider-side reference for the charge.
    pub reference: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ChargeError {
    #[error("charge declined: {0}")]
    Declined(String),
    #[error("payment provider unavailable")]
    ProviderUnavailable,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChargeGateway: Send + Sync {
    async fn charge(
        &self,
        card: &CardDetails,
        amount_cents: i64,
        currency: &str,
    ) -> Result<ChargeReceipt, ChargeError>;
}

/// Placeholder wiring for deployments without a configured provider.
///
/// Every charge fails with `ProviderUnavailable`; the upgrade endpoint stays
/// routable without pretending payments succeeded.
pub struct UnconfiguredGateway;

#[async_trait]
impl ChargeGateway for UnconfiguredGateway {
    async fn charge(
        &self,
        _card: &CardDetails,
        _amount_cents: i64,
        _currency: &str,
    ) -> Result<ChargeReceipt, ChargeError> {
        Err(ChargeError::ProviderUnavailable)
    }
}
