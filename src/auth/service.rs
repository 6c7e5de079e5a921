use chrono::Utc;
use std::sync::Arc;

use super::error::AuthError;
use super::store::CredentialStore;
use super::token::{TokenCodec, TokenPayload};
use crate::models::User;

/// Request-scoped result of a successful [`AccessService::grant_access`].
#[derive(Debug, Clone)]
pub struct AuthenticatedSubject {
    pub user: User,
}

impl AuthenticatedSubject {
    pub fn user_id(&self) -> i64 {
        self.user.id
    }
}

/// Credential verification -> token issuance, and token validation ->
/// subject resolution.
///
/// Holds no mutable state; one instance is shared by all requests.
pub struct AccessService {
    store: Arc<dyn CredentialStore>,
    codec: TokenCodec,
}

impl AccessService {
    pub fn new(store: Arc<dyn CredentialStore>, codec: TokenCodec) -> Self {
        Self { store, codec }
    }

    pub fn codec(&self) -> &TokenCodec {
        &self.codec
    }

    /// Verify `email` / `password` and issue a token for the matching user.
    pub async fn grant_token(&self, email: &str, password: &str) -> Result<String, AuthError> {
        let user = self.store.find_by_email(email).await?;

        let verified = match &user {
            Some(user) if !password.is_empty() => self.store.verify_password(user, password)?,
            _ => false,
        };

        match user {
            Some(user) if verified => {
                tracing::info!(user_id = user.id, "Token granted");
                Ok(self.codec.encode(user.id)?)
            }
            _ => {
                tracing::warn!(email, "Login rejected");
                Err(AuthError::InvalidCredentials)
            }
        }
    }

    /// Validate a bearer token and resolve its subject.
    pub async fn grant_access(&self, token: &str) -> Result<AuthenticatedSubject, AuthError> {
        self.grant_access_at(token, Utc::now().timestamp()).await
    }

    /// [`grant_access`](Self::grant_access) evaluated at epoch second `now`.
    pub async fn grant_access_at(
        &self,
        token: &str,
        now: i64,
    ) -> Result<AuthenticatedSubject, AuthError> {
        let payload = self.codec.decode(token)?;
        let subject_id = validate_payload(&payload, now)?;

        let user = self.store.find_by_id(subject_id).await?.ok_or_else(|| {
            tracing::debug!(subject_id, "Token subject no longer exists");
            AuthError::Unauthorized
        })?;

        Ok(AuthenticatedSubject { user })
    }
}

/// Check claim presence and freshness, returning the subject id.
///
/// A token is still valid at the exact second it expires.
pub fn validate_payload(payload: &TokenPayload, now: i64) -> Result<i64, AuthError> {
    let (Some(subject_id), Some(expires_at)) = (payload.subject_id, payload.expires_at) else {
        return Err(AuthError::Unauthorized);
    };
    if now > expires_at {
        return Err(AuthError::Unauthorized);
    }
    Ok(subject_id)
}
