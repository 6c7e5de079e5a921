use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use super::super::state::AppState;
use super::super::types::{ApiJson, ApiResponse};
use super::{ApiResult, ok};
use crate::error::AppResult;
use crate::models::UserView;
use crate::resources::users::{self, RegisterParams};

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct LoginCredentials {
    #[serde(default)]
    #[schema(example = "user@example.com")]
    pub email: String,
    #[serde(default)]
    #[schema(example = "correct horse battery staple")]
    pub password: String,
}

/// `{"credentials": {"email": ..., "password": ...}}`
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct LoginRequest {
    #[serde(default)]
    pub credentials: LoginCredentials,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TokenResponse {
    #[schema(example = "eyJhbGciOiJIUzI1NiJ9...")]
    pub token: String,
}

/// Exchange email and password for a bearer token
///
/// POST /api/v1/authentication
#[utoipa::path(
    post,
    path = "/api/v1/authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Token issued", body = TokenResponse),
        (status = 401, description = "Invalid Credentials")
    ),
    tag = "Auth"
)]
pub async fn login(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<LoginRequest>,
) -> ApiResult<TokenResponse> {
    let LoginCredentials { email, password } = req.credentials;
    let token = state.access.grant_token(&email, &password).await?;
    ok(TokenResponse { token })
}

/// Register a new user
///
/// POST /api/v1/users
#[utoipa::path(
    post,
    path = "/api/v1/users",
    request_body = RegisterParams,
    responses(
        (status = 201, description = "User registered", body = UserView),
        (status = 422, description = "Blank or malformed email, blank password, or email already taken")
    ),
    tag = "Auth"
)]
pub async fn register(
    State(state): State<Arc<AppState>>,
    ApiJson(params): ApiJson<RegisterParams>,
) -> AppResult<(StatusCode, Json<ApiResponse<UserView>>)> {
    let user = users::register(state.credentials.as_ref(), params).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(UserView::from(&user))),
    ))
}
