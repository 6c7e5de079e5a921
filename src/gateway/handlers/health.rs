//! Health check handler

use std::sync::Arc;

use axum::extract::State;
use chrono::Utc;
use utoipa::ToSchema;

use super::super::state::AppState;
use super::{ApiResult, ok};
use crate::error::AppError;

/// Health check response data
#[derive(serde::Serialize, ToSchema)]
pub struct HealthResponse {
    /// Server timestamp in milliseconds
    #[schema(example = 1703494800000_i64)]
    pub timestamp_ms: i64,
    /// Build revision
    #[schema(example = "a1b2c3d")]
    pub version: String,
}

/// Health check endpoint
///
/// Pings PostgreSQL when it is configured. The failure detail is logged,
/// never returned.
#[utoipa::path(
    get,
    path = "/api/v1/health",
    responses(
        (status = 200, description = "Service healthy", body = HealthResponse, content_type = "application/json"),
        (status = 500, description = "Database unreachable")
    ),
    tag = "System"
)]
pub async fn health_check(State(state): State<Arc<AppState>>) -> ApiResult<HealthResponse> {
    if let Some(db) = &state.database {
        db.health_check()
            .await
            .map_err(|e| AppError::Unhandled(format!("[HEALTH] PostgreSQL ping failed: {}", e)))?;
    }

    ok(HealthResponse {
        timestamp_ms: Utc::now().timestamp_millis(),
        version: env!("GIT_HASH").to_string(),
    })
}
