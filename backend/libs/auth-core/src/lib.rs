//! Shared session-token codec for Ripple services
//!
//! Issues and verifies compact signed session tokens (HS256) carrying the
//! caller's identity and role claims with an embedded expiry.
//!
//! ## Security Design
//!
//! - **Signature first**: `decode` verifies the HMAC signature before any
//!   claim is deserialized or trusted. A forged token is rejected before its
//!   claims are ever inspected.
//! - **Injected secret**: the signing key is loaded once at startup and
//!   handed to the codec; there is no global mutable key state.
//! - **Injected clock**: expiry is checked against a caller-supplied `Clock`
//!   so token lifetimes are deterministic under test.
//!
//! Callers are expected to collapse every [`TokenError`] variant into a
//! single unauthenticated outcome; the variants exist for logging only.

pub mod clock;

pub use clock::{Clock, SystemClock};

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Claims embedded in every session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (identity ID as UUID string)
    pub sub: String,
    /// Role claim, e.g. "USER" or "MODERATOR"
    pub role: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Parse the subject claim as a UUID.
    pub fn subject_id(&self) -> Option<Uuid> {
        Uuid::parse_str(&self.sub).ok()
    }
}

/// Why a token failed to decode.
///
/// `decode` only ever returns `BadSignature`, `Expired` or `Malformed`;
/// `Signing` can only come out of `issue`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    #[error("token signature verification failed")]
    BadSignature,
    #[error("token expired")]
    Expired,
    #[error("token malformed")]
    Malformed,
    #[error("token signing failed: {0}")]
    Signing(String),
}

/// Signs and verifies session tokens with a process-wide symmetric secret.
///
/// Construct one at startup from configuration and share it behind an `Arc`.
#[derive(Clone)]
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
}

impl TokenCodec {
    /// Build a codec from the raw signing secret and a token lifetime.
    pub fn new(secret: &[u8], ttl_secs: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            ttl: Duration::seconds(ttl_secs),
        }
    }

    /// Token lifetime in seconds, for session bookkeeping and responses.
    pub fn ttl_secs(&self) -> i64 {
        self.ttl.num_seconds()
    }

    /// Issue a signed token for the given identity and role.
    ///
    /// The token embeds `iat` and `exp` derived from `now`; any bit-flip in
    /// the result invalidates the signature.
    pub fn issue(
        &self,
        identity_id: Uuid,
        role: &str,
        now: DateTime<Utc>,
    ) -> Result<String, TokenError> {
        let claims = Claims {
            sub: identity_id.to_string(),
            role: role.to_string(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }

    /// Verify a presented token and return its claims.
    ///
    /// The signature is checked before the claims are deserialized; the
    /// expiry is then checked against `now`. Signature verification preceding
    /// semantic checks is a correctness invariant of this codec, not an
    /// optimization.
    pub fn decode(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked below against the injected clock, not the
        // library's system clock.
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        let data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                ErrorKind::InvalidSignature => TokenError::BadSignature,
                _ => TokenError::Malformed,
            }
        })?;

        if now.timestamp() >= data.claims.exp {
            return Err(TokenError::Expired);
        }

        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const SECRET: &[u8] = b"test-signing-secret-at-least-32b";

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn issue_then_decode_returns_claims() {
        let codec = TokenCodec::new(SECRET, 3600);
        let id = Uuid::new_v4();
        let now = fixed_now();

        let token = codec.issue(id, "USER", now).unwrap();
        let claims = codec.decode(&token, now).unwrap();

        assert_eq!(claims.subject_id(), Some(id));
        assert_eq!(claims.role, "USER");
        assert_eq!(claims.iat, now.timestamp());
        assert_eq!(claims.exp, now.timestamp() + 3600);
    }

    #[test]
    fn decode_fails_expired_once_ttl_elapses() {
        let codec = TokenCodec::new(SECRET, 60);
        let now = fixed_now();
        let token = codec.issue(Uuid::new_v4(), "USER", now).unwrap();

        // Still valid one second before expiry.
        assert!(codec.decode(&token, now + Duration::seconds(59)).is_ok());
        // Rejected at and after the expiry instant.
        assert_eq!(
            codec.decode(&token, now + Duration::seconds(60)),
            Err(TokenError::Expired)
        );
        assert_eq!(
            codec.decode(&token, now + Duration::seconds(3600)),
            Err(TokenError::Expired)
        );
    }

    #[test]
    fn tampered_payload_is_bad_signature() {
        let codec = TokenCodec::new(SECRET, 3600);
        let now = fixed_now();
        let token = codec.issue(Uuid::new_v4(), "USER", now).unwrap();

        // Flip one character in the payload segment.
        let mut parts: Vec<String> = token.split('.').map(String::from).collect();
        let payload = &mut parts[1];
        let mid = payload.len() / 2;
        let replacement = if payload.as_bytes()[mid] == b'A' { "B" } else { "A" };
        payload.replace_range(mid..=mid, replacement);
        let tampered = parts.join(".");

        assert_eq!(
            codec.decode(&tampered, now),
            Err(TokenError::BadSignature)
        );
    }

    #[test]
    fn wrong_secret_is_bad_signature() {
        let codec = TokenCodec::new(SECRET, 3600);
        let other = TokenCodec::new(b"another-secret-entirely-32-bytes", 3600);
        let now = fixed_now();
        let token = codec.issue(Uuid::new_v4(), "MODERATOR", now).unwrap();

        assert_eq!(other.decode(&token, now), Err(TokenError::BadSignature));
    }

    #[test]
    fn garbage_is_malformed() {
        let codec = TokenCodec::new(SECRET, 3600);
        let now = fixed_now();

        assert_eq!(
            codec.decode("not-a-token", now),
            Err(TokenError::Malformed)
        );
        assert_eq!(codec.decode("", now), Err(TokenError::Malformed));
    }
}
