use serde::Deserialize;
use utoipa::ToSchema;

use super::Presence;
use crate::error::{AppError, AppResult};
use crate::models::Organization;
use crate::store::ResourceStore;

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct OrganizationParams {
    #[schema(example = "Acme")]
    pub name: Option<String>,
}

pub async fn show(store: &dyn ResourceStore, id: i64) -> AppResult<Organization> {
    store.find_organization(id).await?.ok_or(AppError::NotFound)
}

pub async fn create(
    store: &dyn ResourceStore,
    params: OrganizationParams,
) -> AppResult<Organization> {
    Presence::default()
        .require("Name", params.name.as_deref())
        .finish()?;
    let name = params.name.unwrap_or_default();

    let organization = store.insert_organization(&name).await?;
    tracing::info!(organization_id = organization.id, "Organization created");
    Ok(organization)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[tokio::test]
    async fn test_create_and_find() {
        let store = MemoryStore::new();
        let org = create(
            &store,
            OrganizationParams {
                name: Some("Acme".into()),
            },
        )
        .await
        .unwrap();
        assert_eq!(show(&store, org.id).await.unwrap(), org);
    }

    #[tokio::test]
    async fn test_blank_name_rejected() {
        let store = MemoryStore::new();
        let err = create(&store, OrganizationParams::default())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Name can't be blank");
    }

    #[tokio::test]
    async fn test_missing_is_not_found() {
        let store = MemoryStore::new();
        assert!(matches!(show(&store, 1).await, Err(AppError::NotFound)));
    }
}
