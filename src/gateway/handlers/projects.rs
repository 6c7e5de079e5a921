use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use std::sync::Arc;

use super::super::state::AppState;
use super::super::types::{ApiJson, ApiResponse};
use super::{ApiResult, ok, parse_id};
use crate::error::AppResult;
use crate::models::{Organization, Project};
use crate::resources::{
    organizations,
    projects::{self, ProjectParams},
};
use crate::store::ResourceStore;

async fn load_organization(store: &dyn ResourceStore, raw_id: &str) -> AppResult<Organization> {
    organizations::show(store, parse_id(raw_id)?).await
}

async fn load_project(
    store: &dyn ResourceStore,
    organization_id: &str,
    id: &str,
) -> AppResult<Project> {
    let organization = load_organization(store, organization_id).await?;
    projects::show(store, &organization, parse_id(id)?).await
}

/// List the projects of an organization
///
/// GET /api/v1/organizations/{organization_id}/projects
#[utoipa::path(
    get,
    path = "/api/v1/organizations/{organization_id}/projects",
    params(("organization_id" = i64, Path, description = "Organization ID")),
    responses(
        (status = 200, description = "Projects in id order", body = Vec<Project>),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "Not Found")
    ),
    security(("bearer_auth" = [])),
    tag = "Projects"
)]
pub async fn list_projects(
    State(state): State<Arc<AppState>>,
    Path(organization_id): Path<String>,
) -> ApiResult<Vec<Project>> {
    let store = state.resources.as_ref();
    let organization = load_organization(store, &organization_id).await?;
    ok(projects::index(store, &organization).await?)
}

/// Create a project
///
/// POST /api/v1/organizations/{organization_id}/projects
#[utoipa::path(
    post,
    path = "/api/v1/organizations/{organization_id}/projects",
    params(("organization_id" = i64, Path, description = "Organization ID")),
    request_body = ProjectParams,
    responses(
        (status = 201, description = "Project created", body = Project),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "Not Found"),
        (status = 422, description = "Name can't be blank")
    ),
    security(("bearer_auth" = [])),
    tag = "Projects"
)]
pub async fn create_project(
    State(state): State<Arc<AppState>>,
    Path(organization_id): Path<String>,
    ApiJson(params): ApiJson<ProjectParams>,
) -> AppResult<(StatusCode, Json<ApiResponse<Project>>)> {
    let store = state.resources.as_ref();
    let organization = load_organization(store, &organization_id).await?;
    let project = projects::create(store, &organization, params).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(project))))
}

/// Show a project
///
/// GET /api/v1/organizations/{organization_id}/projects/{id}
#[utoipa::path(
    get,
    path = "/api/v1/organizations/{organization_id}/projects/{id}",
    params(
        ("organization_id" = i64, Path, description = "Organization ID"),
        ("id" = i64, Path, description = "Project ID")
    ),
    responses(
        (status = 200, description = "Project", body = Project),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "Not Found")
    ),
    security(("bearer_auth" = [])),
    tag = "Projects"
)]
pub async fn show_project(
    State(state): State<Arc<AppState>>,
    Path((organization_id, id)): Path<(String, String)>,
) -> ApiResult<Project> {
    ok(load_project(state.resources.as_ref(), &organization_id, &id).await?)
}

/// Update a project
///
/// PATCH /api/v1/organizations/{organization_id}/projects/{id}
#[utoipa::path(
    patch,
    path = "/api/v1/organizations/{organization_id}/projects/{id}",
    params(
        ("organization_id" = i64, Path, description = "Organization ID"),
        ("id" = i64, Path, description = "Project ID")
    ),
    request_body = ProjectParams,
    responses(
        (status = 200, description = "Updated project", body = Project),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "Not Found"),
        (status = 422, description = "Name can't be blank")
    ),
    security(("bearer_auth" = [])),
    tag = "Projects"
)]
pub async fn update_project(
    State(state): State<Arc<AppState>>,
    Path((organization_id, id)): Path<(String, String)>,
    ApiJson(params): ApiJson<ProjectParams>,
) -> ApiResult<Project> {
    let store = state.resources.as_ref();
    let project = load_project(store, &organization_id, &id).await?;
    ok(projects::update(store, &project, params).await?)
}

/// Delete a project and its tasks
///
/// DELETE /api/v1/organizations/{organization_id}/projects/{id}
#[utoipa::path(
    delete,
    path = "/api/v1/organizations/{organization_id}/projects/{id}",
    params(
        ("organization_id" = i64, Path, description = "Organization ID"),
        ("id" = i64, Path, description = "Project ID")
    ),
    responses(
        (status = 200, description = "Project deleted"),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "Not Found")
    ),
    security(("bearer_auth" = [])),
    tag = "Projects"
)]
pub async fn delete_project(
    State(state): State<Arc<AppState>>,
    Path((organization_id, id)): Path<(String, String)>,
) -> ApiResult<()> {
    let store = state.resources.as_ref();
    let project = load_project(store, &organization_id, &id).await?;
    projects::destroy(store, &project).await?;
    ok(())
}
