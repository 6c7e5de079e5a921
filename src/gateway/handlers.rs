//! HTTP handlers
//!
//! Handlers only translate between the wire and the services in
//! [`crate::resources`] / [`crate::auth`]; every failure is an [`AppError`].

pub mod auth;
pub mod health;
pub mod organizations;
pub mod projects;
pub mod tasks;

use axum::Json;

use super::types::ApiResponse;
use crate::error::{AppError, AppResult};

pub use auth::{LoginCredentials, LoginRequest, TokenResponse, login, register};
pub use health::{HealthResponse, health_check};

/// Handler return type: enveloped payload or [`AppError`].
pub type ApiResult<T> = AppResult<Json<ApiResponse<T>>>;

/// Wrap `data` in a success envelope.
pub fn ok<T>(data: T) -> ApiResult<T> {
    Ok(Json(ApiResponse::success(data)))
}

/// Path ids arrive as strings; anything that is not an id cannot name a row.
pub(crate) fn parse_id(raw: &str) -> Result<i64, AppError> {
    raw.parse().map_err(|_| AppError::NotFound)
}
