use serde::Deserialize;
use utoipa::ToSchema;

use super::Presence;
use crate::error::{AppError, AppResult};
use crate::models::{Project, Task};
use crate::store::ResourceStore;

/// Accepted task attributes. Absent fields are left untouched on update.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct TaskParams {
    #[schema(example = "Draft copy")]
    pub name: Option<String>,
    #[schema(example = "First pass at the landing page text")]
    pub description: Option<String>,
}

pub async fn index(store: &dyn ResourceStore, project: &Project) -> AppResult<Vec<Task>> {
    Ok(store.list_tasks(project.id).await?)
}

/// Look up a task scoped to its project.
pub async fn show(store: &dyn ResourceStore, project: &Project, id: i64) -> AppResult<Task> {
    store
        .find_task(id)
        .await?
        .filter(|task| task.project_id == project.id)
        .ok_or(AppError::NotFound)
}

pub async fn create(
    store: &dyn ResourceStore,
    project: &Project,
    params: TaskParams,
) -> AppResult<Task> {
    Presence::default()
        .require("Name", params.name.as_deref())
        .require("Description", params.description.as_deref())
        .finish()?;
    let name = params.name.unwrap_or_default();
    let description = params.description.unwrap_or_default();

    let task = store.insert_task(project.id, &name, &description).await?;
    tracing::info!(task_id = task.id, project_id = project.id, "Task created");
    Ok(task)
}

pub async fn update(store: &dyn ResourceStore, task: &Task, params: TaskParams) -> AppResult<Task> {
    let name = params.name.unwrap_or_else(|| task.name.clone());
    let description = params
        .description
        .unwrap_or_else(|| task.description.clone());
    Presence::default()
        .require("Name", Some(name.as_str()))
        .require("Description", Some(description.as_str()))
        .finish()?;

    store
        .update_task(task.id, &name, &description)
        .await?
        .ok_or(AppError::NotFound)
}

pub async fn destroy(store: &dyn ResourceStore, task: &Task) -> AppResult<()> {
    if !store.delete_task(task.id).await? {
        return Err(AppError::NotFound);
    }
    tracing::info!(task_id = task.id, "Task deleted");
    Ok(())
}
