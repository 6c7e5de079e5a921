//! Stateless JWT authentication
//!
//! - [`TokenCodec`]: HS256 sign / verify of `{iat, exp, user_id}`
//! - [`AccessService`]: `grant_token` (login) and `grant_access` (bearer validation)
//! - [`CredentialStore`]: user lookup contract the service depends on

pub mod error;
pub mod password;
pub mod service;
pub mod store;
pub mod token;

pub use error::AuthError;
pub use service::{AccessService, AuthenticatedSubject, validate_payload};
pub use store::CredentialStore;
pub use token::{TOKEN_ALGORITHM, TokenCodec, TokenError, TokenPayload};
