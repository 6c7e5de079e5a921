//! Token codec
//!
//! Signs and verifies HS256 JWTs carrying `{iat, exp, user_id}`. The codec
//! only checks the signature and the algorithm; expiry and claim presence
//! are enforced by [`AccessService`](super::AccessService).

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::config::SigningSecret;

/// The only algorithm tokens are signed with or accepted under.
pub const TOKEN_ALGORITHM: Algorithm = Algorithm::HS256;

/// Decoded token payload.
///
/// Every claim is optional on the wire so that a well-signed token with a
/// missing claim decodes and is rejected by payload validation rather than
/// by the codec.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPayload {
    /// Issued at (epoch seconds)
    #[serde(rename = "iat", default, skip_serializing_if = "Option::is_none")]
    pub issued_at: Option<i64>,
    /// Expiration (epoch seconds)
    #[serde(rename = "exp", default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<i64>,
    #[serde(rename = "user_id", default, skip_serializing_if = "Option::is_none")]
    pub subject_id: Option<i64>,
}

/// Opaque codec failure: malformed input, bad signature, wrong algorithm,
/// unparseable claims, or a signing failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Invalid Token")]
pub struct TokenError;

#[derive(Clone)]
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl_secs: i64,
}

impl TokenCodec {
    pub fn new(secret: &SigningSecret, ttl_secs: i64) -> Self {
        let mut validation = Validation::new(TOKEN_ALGORITHM);
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.required_spec_claims.clear();

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl_secs,
        }
    }

    /// Issue a token for `subject_id`, valid from now for the configured TTL.
    pub fn encode(&self, subject_id: i64) -> Result<String, TokenError> {
        self.encode_at(subject_id, Utc::now().timestamp())
    }

    pub fn encode_at(&self, subject_id: i64, now: i64) -> Result<String, TokenError> {
        let expires_at = now.checked_add(self.ttl_secs).ok_or_else(|| {
            tracing::error!(ttl_secs = self.ttl_secs, "Token expiry out of range");
            TokenError
        })?;
        self.sign(&TokenPayload {
            issued_at: Some(now),
            expires_at: Some(expires_at),
            subject_id: Some(subject_id),
        })
    }

    /// Sign an arbitrary payload as-is.
    pub fn sign(&self, payload: &TokenPayload) -> Result<String, TokenError> {
        encode(&Header::new(TOKEN_ALGORITHM), payload, &self.encoding_key).map_err(|e| {
            tracing::error!("Token signing failed: {}", e);
            TokenError
        })
    }

    pub fn decode(&self, token: &str) -> Result<TokenPayload, TokenError> {
        decode::<TokenPayload>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!("Token rejected: {:?}", e.kind());
                TokenError
            })
    }
}

impl std::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCodec")
            .field("algorithm", &TOKEN_ALGORITHM)
            .field("ttl_secs", &self.ttl_secs)
            .finish_non_exhaustive()
    }
}
