use serde::Deserialize;
use utoipa::ToSchema;

use super::Presence;
use crate::error::{AppError, AppResult};
use crate::models::{Organization, Project};
use crate::store::ResourceStore;

/// Accepted project attributes. Absent fields are left untouched on update.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct ProjectParams {
    #[schema(example = "Website relaunch")]
    pub name: Option<String>,
}

/// All projects of `organization`, ordered by id.
pub async fn index(store: &dyn ResourceStore, organization: &Organization) -> AppResult<Vec<Project>> {
    Ok(store.list_projects(organization.id).await?)
}

/// Look up a project scoped to its organization.
pub async fn show(
    store: &dyn ResourceStore,
    organization: &Organization,
    id: i64,
) -> AppResult<Project> {
    store
        .find_project(id)
        .await?
        .filter(|project| project.organization_id == organization.id)
        .ok_or(AppError::NotFound)
}

/// Look up a project by id alone.
pub async fn find_unscoped(store: &dyn ResourceStore, id: i64) -> AppResult<Project> {
    store.find_project(id).await?.ok_or(AppError::NotFound)
}

pub async fn create(
    store: &dyn ResourceStore,
    organization: &Organization,
    params: ProjectParams,
) -> AppResult<Project> {
    Presence::default()
        .require("Name", params.name.as_deref())
        .finish()?;
    let name = params.name.unwrap_or_default();

    let project = store.insert_project(organization.id, &name).await?;
    tracing::info!(
        project_id = project.id,
        organization_id = organization.id,
        "Project created"
    );
    Ok(project)
}

pub async fn update(
    store: &dyn ResourceStore,
    project: &Project,
    params: ProjectParams,
) -> AppResult<Project> {
    let name = params.name.unwrap_or_else(|| project.name.clone());
    Presence::default().require("Name", Some(name.as_str())).finish()?;

    store
        .update_project(project.id, &name)
        .await?
        .ok_or(AppError::NotFound)
}

/// Delete a project together with its tasks.
pub async fn destroy(store: &dyn ResourceStore, project: &Project) -> AppResult<()> {
    if !store.delete_project(project.id).await? {
        return Err(AppError::NotFound);
    }
    tracing::info!(project_id = project.id, "Project deleted");
    Ok(())
}
