use async_trait::async_trait;

use super::password;
use crate::models::User;
use crate::store::StoreError;

/// Source of user records for the access service.
///
/// Lookups by email are exact, case-sensitive matches.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, StoreError>;

    /// Insert a user. Fails with [`StoreError::Conflict`] when the email is taken.
    async fn create_user(&self, email: &str, password_hash: &str) -> Result<User, StoreError>;

    /// Check `plaintext` against the stored argon2 hash.
    ///
    /// A mismatch is `Ok(false)`; only an unparseable stored hash is an error.
    fn verify_password(&self, user: &User, plaintext: &str) -> Result<bool, StoreError> {
        password::verify_password(plaintext, &user.password_hash)
            .map_err(|e| StoreError::Hash(e.to_string()))
    }
}
