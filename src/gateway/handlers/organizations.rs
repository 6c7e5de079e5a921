use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use std::sync::Arc;

use super::super::state::AppState;
use super::super::types::{ApiJson, ApiResponse};
use super::{ApiResult, ok, parse_id};
use crate::auth::AuthenticatedSubject;
use crate::error::AppResult;
use crate::models::Organization;
use crate::resources::organizations::{self, OrganizationParams};

/// Create an organization
///
/// POST /api/v1/organizations
#[utoipa::path(
    post,
    path = "/api/v1/organizations",
    request_body = OrganizationParams,
    responses(
        (status = 201, description = "Organization created", body = Organization),
        (status = 401, description = "Missing or invalid token"),
        (status = 422, description = "Name can't be blank")
    ),
    security(("bearer_auth" = [])),
    tag = "Organizations"
)]
pub async fn create_organization(
    State(state): State<Arc<AppState>>,
    Extension(subject): Extension<AuthenticatedSubject>,
    ApiJson(params): ApiJson<OrganizationParams>,
) -> AppResult<(StatusCode, Json<ApiResponse<Organization>>)> {
    let organization = organizations::create(state.resources.as_ref(), params).await?;
    tracing::debug!(
        user_id = subject.user_id(),
        organization_id = organization.id,
        "Organization created by user"
    );
    Ok((StatusCode::CREATED, Json(ApiResponse::success(organization))))
}

/// Show an organization
///
/// GET /api/v1/organizations/{id}
#[utoipa::path(
    get,
    path = "/api/v1/organizations/{id}",
    params(("id" = i64, Path, description = "Organization ID")),
    responses(
        (status = 200, description = "Organization", body = Organization),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "Not Found")
    ),
    security(("bearer_auth" = [])),
    tag = "Organizations"
)]
pub async fn show_organization(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Organization> {
    ok(organizations::show(state.resources.as_ref(), parse_id(&id)?).await?)
}
