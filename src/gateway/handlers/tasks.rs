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
use crate::models::{Project, Task};
use crate::resources::{
    projects,
    tasks::{self, TaskParams},
};
use crate::store::ResourceStore;

async fn load_project(store: &dyn ResourceStore, raw_id: &str) -> AppResult<Project> {
    projects::find_unscoped(store, parse_id(raw_id)?).await
}

async fn load_task(store: &dyn ResourceStore, project_id: &str, id: &str) -> AppResult<Task> {
    let project = load_project(store, project_id).await?;
    tasks::show(store, &project, parse_id(id)?).await
}

/// List the tasks of a project
///
/// GET /api/v1/projects/{project_id}/tasks
#[utoipa::path(
    get,
    path = "/api/v1/projects/{project_id}/tasks",
    params(("project_id" = i64, Path, description = "Project ID")),
    responses(
        (status = 200, description = "Tasks in id order", body = Vec<Task>),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "Not Found")
    ),
    security(("bearer_auth" = [])),
    tag = "Tasks"
)]
pub async fn list_tasks(
    State(state): State<Arc<AppState>>,
    Path(project_id): Path<String>,
) -> ApiResult<Vec<Task>> {
    let store = state.resources.as_ref();
    let project = load_project(store, &project_id).await?;
    ok(tasks::index(store, &project).await?)
}

/// Create a task
///
/// POST /api/v1/projects/{project_id}/tasks
#[utoipa::path(
    post,
    path = "/api/v1/projects/{project_id}/tasks",
    params(("project_id" = i64, Path, description = "Project ID")),
    request_body = TaskParams,
    responses(
        (status = 201, description = "Task created", body = Task),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "Not Found"),
        (status = 422, description = "Name or Description can't be blank")
    ),
    security(("bearer_auth" = [])),
    tag = "Tasks"
)]
pub async fn create_task(
    State(state): State<Arc<AppState>>,
    Path(project_id): Path<String>,
    ApiJson(params): ApiJson<TaskParams>,
) -> AppResult<(StatusCode, Json<ApiResponse<Task>>)> {
    let store = state.resources.as_ref();
    let project = load_project(store, &project_id).await?;
    let task = tasks::create(store, &project, params).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(task))))
}

#[utoipa::path(
    get,
    path = "/api/v1/projects/{project_id}/tasks/{id}",
    params(
        ("project_id" = i64, Path, description = "Project ID"),
        ("id" = i64, Path, description = "Task ID")
    ),
    responses(
        (status = 200, description = "Task", body = Task),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "Not Found")
    ),
    security(("bearer_auth" = [])),
    tag = "Tasks"
)]
pub async fn show_task(
    State(state): State<Arc<AppState>>,
    Path((project_id, id)): Path<(String, String)>,
) -> ApiResult<Task> {
    ok(load_task(state.resources.as_ref(), &project_id, &id).await?)
}

#[utoipa::path(
    patch,
    path = "/api/v1/projects/{project_id}/tasks/{id}",
    params(
        ("project_id" = i64, Path, description = "Project ID"),
        ("id" = i64, Path, description = "Task ID")
    ),
    request_body = TaskParams,
    responses(
        (status = 200, description = "Updated task", body = Task),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "Not Found"),
        (status = 422, description = "Name or Description can't be blank")
    ),
    security(("bearer_auth" = [])),
    tag = "Tasks"
)]
pub async fn update_task(
    State(state): State<Arc<AppState>>,
    Path((project_id, id)): Path<(String, String)>,
    ApiJson(params): ApiJson<TaskParams>,
) -> ApiResult<Task> {
    let store = state.resources.as_ref();
    let task = load_task(store, &project_id, &id).await?;
    ok(tasks::update(store, &task, params).await?)
}

#[utoipa::path(
    delete,
    path = "/api/v1/projects/{project_id}/tasks/{id}",
    params(
        ("project_id" = i64, Path, description = "Project ID"),
        ("id" = i64, Path, description = "Task ID")
    ),
    responses(
        (status = 200, description = "Task deleted"),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "Not Found")
    ),
    security(("bearer_auth" = [])),
    tag = "Tasks"
)]
pub async fn delete_task(
    State(state): State<Arc<AppState>>,
    Path((project_id, id)): Path<(String, String)>,
) -> ApiResult<()> {
    let store = state.resources.as_ref();
    let task = load_task(store, &project_id, &id).await?;
    tasks::destroy(store, &task).await?;
    ok(())
}
