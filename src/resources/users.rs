use serde::Deserialize;
use utoipa::ToSchema;
use validator::ValidateEmail;

use super::Presence;
use crate::auth::CredentialStore;
use crate::auth::password::hash_password;
use crate::error::{AppError, AppResult};
use crate::models::User;

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct RegisterParams {
    #[schema(example = "user@example.com")]
    pub email: Option<String>,
    #[schema(example = "correct horse battery staple")]
    pub password: Option<String>,
}

/// Create a user with an argon2-hashed password.
///
/// Emails are stored as given; lookups at login are exact matches.
pub async fn register(store: &dyn CredentialStore, params: RegisterParams) -> AppResult<User> {
    Presence::default()
        .require("Email", params.email.as_deref())
        .require("Password", params.password.as_deref())
        .finish()?;
    let email = params.email.unwrap_or_default();
    let password = params.password.unwrap_or_default();

    if !email.validate_email() {
        return Err(AppError::ValidationFailed(vec!["Email is invalid".to_string()]));
    }

    let password_hash =
        hash_password(&password).map_err(|e| AppError::Unhandled(e.to_string()))?;
    let user = store.create_user(&email, &password_hash).await?;

    tracing::info!(user_id = user.id, "User registered");
    Ok(user)
}
