/**
 * Session Tokens
 *
 * This module issues and verifies the signed, time-limited tokens that carry
 * a caller's identity between requests.
 *
 * # Wire Format
 *
 * A compact HS256 JWS: three base64url segments (`header.payload.signature`)
 * whose payload is `{"id": <identity>, "iat": <unix secs>, "exp": <unix secs>}`.
 *
 * # Statelessness
 *
 * No session table exists. A token is valid exactly when its signature
 * matches the configured secret and the current time is before `exp`, so a
 * token cannot be revoked before it expires.
 */
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use chrono::Utc;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

use crate::shared::config::AppConfig;
use crate::shared::identity::Identity;

/// JWT claims structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Principal identity
    pub id: String,
    /// Issued at time (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

/// Why a token was rejected
///
/// These distinctions are for logs only; the HTTP layer collapses every
/// variant into the same 401 response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("token is malformed")]
    Malformed,
    #[error("token signature is invalid")]
    InvalidSignature,
    #[error("token has expired")]
    Expired,
    #[error("failed to sign token: {0}")]
    Signing(String),
}

/// Anything able to turn a raw token into a verified identity
///
/// The auth middleware depends on this trait rather than on [`TokenCodec`]
/// directly.
pub trait TokenVerifier: Send + Sync {
    fn verify(&self, token: &str) -> Result<Identity, TokenError>;
}

/// Issues and verifies session tokens with a symmetric secret
#[derive(Clone)]
pub struct TokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl std::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCodec").field("ttl", &self.ttl).finish_non_exhaustive()
    }
}

impl TokenCodec {
    /// Create a codec for `secret` issuing tokens valid for `ttl`
    pub fn new(secret: &str, ttl: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked in `verify_at` against an explicit clock.
        validation.validate_exp = false;
        validation.leeway = 0;

        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(&config.jwt_secret, config.token_ttl)
    }

    /// Default lifetime of issued tokens
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issue a token for `identity` with the configured lifetime
    pub fn issue(&self, identity: &Identity) -> Result<String, TokenError> {
        self.issue_with_ttl(identity, self.ttl)
    }

    /// Issue a token for `identity` expiring `ttl` from now
    pub fn issue_with_ttl(&self, identity: &Identity, ttl: Duration) -> Result<String, TokenError> {
        self.issue_at(identity, ttl, Utc::now().timestamp())
    }

    /// Issue a token as if the current time were `now` (Unix seconds)
    pub fn issue_at(&self, identity: &Identity, ttl: Duration, now: i64) -> Result<String, TokenError> {
        let ttl_secs = i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX);
        let claims = Claims {
            id: identity.as_str().to_string(),
            iat: now,
            exp: now.saturating_add(ttl_secs),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }

    /// Verify `token` against the current time
    pub fn verify(&self, token: &str) -> Result<Identity, TokenError> {
        self.verify_at(token, Utc::now().timestamp())
    }

    /// Verify `token` as if the current time were `now` (Unix seconds)
    ///
    /// A token is expired once `now` reaches `exp`.
    pub fn verify_at(&self, token: &str, now: i64) -> Result<Identity, TokenError> {
        check_structure(token)?;

        let data = decode::<Claims>(token, &self.decoding, &self.validation).map_err(|e| {
            match e.kind() {
                ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => {
                    TokenError::InvalidSignature
                }
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Malformed,
            }
        })?;

        if now >= data.claims.exp {
            return Err(TokenError::Expired);
        }
        if data.claims.id.is_empty() {
            return Err(TokenError::Malformed);
        }

        Ok(Identity::new(data.claims.id))
    }
}

impl TokenVerifier for TokenCodec {
    fn verify(&self, token: &str) -> Result<Identity, TokenError> {
        TokenCodec::verify(self, token)
    }
}

/// Reject anything that is not three base64url segments with JSON-object
/// header and payload, before any signature work is done
fn check_structure(token: &str) -> Result<(), TokenError> {
    let mut parts = token.split('.');
    let (Some(header), Some(payload), Some(signature), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(TokenError::Malformed);
    };

    if header.is_empty() || payload.is_empty() || signature.is_empty() {
        return Err(TokenError::Malformed);
    }

    for segment in [header, payload] {
        let bytes = URL_SAFE_NO_PAD
            .decode(segment)
            .map_err(|_| TokenError::Malformed)?;
        let value: serde_json::Value =
            serde_json::from_slice(&bytes).map_err(|_| TokenError::Malformed)?;
        if !value.is_object() {
            return Err(TokenError::Malformed);
        }
    }

    URL_SAFE_NO_PAD
        .decode(signature)
        .map_err(|_| TokenError::Malformed)?;

    Ok(())
}
