use super::token::TokenError;
use crate::store::StoreError;

/// Failures of the access service.
///
/// Unknown email and wrong password share [`AuthError::InvalidCredentials`]
/// so callers cannot tell which one happened.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid Credentials")]
    InvalidCredentials,

    /// Codec failure (see [`TokenError`]).
    #[error("Invalid Token")]
    InvalidToken,

    /// Well-formed token that is missing claims, expired, or whose subject
    /// no longer exists.
    #[error("User unauthorized for action")]
    Unauthorized,

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<TokenError> for AuthError {
    fn from(_: TokenError) -> Self {
        Self::InvalidToken
    }
}
