use axum::{
    body::Body,
    extract::State,
    http::{HeaderMap, Request, header},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

use super::state::AppState;
use crate::error::AppError;

const BEARER_PREFIX: &str = "Bearer ";

/// Pull the token out of `Authorization: Bearer <token>`.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix(BEARER_PREFIX))
        .map(str::trim)
}

/// Resolve the bearer token to an [`AuthenticatedSubject`](crate::auth::AuthenticatedSubject)
/// and hand it to the handler as a request extension.
pub async fn bearer_auth_middleware(
    State(state): State<Arc<AppState>>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let token = bearer_token(request.headers()).ok_or(AppError::Unauthorized)?;

    let subject = state.access.grant_access(token).await?;
    tracing::debug!(user_id = subject.user_id(), "Request authenticated");

    request.extensions_mut().insert(subject);
    Ok(next.run(request).await)
}
