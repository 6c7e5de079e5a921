//! Application error taxonomy and its HTTP rendering
//!
//! | Kind | Status |
//! |---|---|
//! | `InvalidCredentials`, `InvalidToken`, `Unauthorized` | 401 |
//! | `NotFound` | 404 |
//! | `ValidationFailed` | 422 |
//! | `Unhandled` | 500 |

use axum::Json;
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};

use crate::auth::AuthError;
use crate::gateway::types::{ApiResponse, error_codes};
use crate::store::StoreError;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid Credentials")]
    InvalidCredentials,

    #[error("Invalid Token")]
    InvalidToken,

    #[error("User unauthorized for action")]
    Unauthorized,

    #[error("Not Found")]
    NotFound,

    #[error("{}", .0.join(", "))]
    ValidationFailed(Vec<String>),

    /// Detail is logged, never rendered.
    #[error("Internal Server Error")]
    Unhandled(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidCredentials | Self::InvalidToken | Self::Unauthorized => {
                StatusCode::UNAUTHORIZED
            }
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::ValidationFailed(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Unhandled(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> i32 {
        match self {
            Self::InvalidCredentials => error_codes::INVALID_CREDENTIALS,
            Self::InvalidToken => error_codes::INVALID_TOKEN,
            Self::Unauthorized => error_codes::UNAUTHORIZED,
            Self::NotFound => error_codes::NOT_FOUND,
            Self::ValidationFailed(_) => error_codes::VALIDATION_FAILED,
            Self::Unhandled(_) => error_codes::INTERNAL_ERROR,
        }
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials => Self::InvalidCredentials,
            AuthError::InvalidToken => Self::InvalidToken,
            AuthError::Unauthorized => Self::Unauthorized,
            AuthError::Store(e) => e.into(),
        }
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Conflict(msg) => Self::ValidationFailed(vec![msg]),
            StoreError::MissingParent => Self::NotFound,
            other => Self::Unhandled(other.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let Self::Unhandled(detail) = &self {
            tracing::error!("Unhandled error: {}", detail);
        }

        let status = self.status();
        let body = ApiResponse::<()>::error(self.code(), self.to_string());
        let mut response = (status, Json(body)).into_response();

        if status == StatusCode::UNAUTHORIZED {
            response.headers_mut().insert(
                header::WWW_AUTHENTICATE,
                HeaderValue::from_static("Bearer"),
            );
        }
        response
    }
}
