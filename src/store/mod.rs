//! Storage layer
//!
//! Two backends implement both [`ResourceStore`] and
//! [`CredentialStore`](crate::auth::CredentialStore):
//!
//! - [`PgStore`]: PostgreSQL via `sqlx`
//! - [`MemoryStore`]: process-local tables, used when no database is configured
//!
//! The stores perform no validation beyond uniqueness; presence rules and
//! parent scoping live in [`crate::resources`].

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

use async_trait::async_trait;

use crate::models::{Organization, Project, Task};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Unique constraint violated; carries the user-facing message.
    #[error("{0}")]
    Conflict(String),

    #[error("Invalid password hash: {0}")]
    Hash(String),

    /// Insert under a parent row that does not exist (or was just deleted).
    #[error("Parent record not found")]
    MissingParent,
}

/// Persistence contract for the Organization -> Project -> Task hierarchy.
///
/// Lists are ordered by id. `update_*` returns `None` and `delete_*`
/// returns `false` when the row does not exist.
#[async_trait]
pub trait ResourceStore: Send + Sync {
    async fn insert_organization(&self, name: &str) -> Result<Organization, StoreError>;
    async fn find_organization(&self, id: i64) -> Result<Option<Organization>, StoreError>;

    async fn list_projects(&self, organization_id: i64) -> Result<Vec<Project>, StoreError>;
    async fn insert_project(&self, organization_id: i64, name: &str)
    -> Result<Project, StoreError>;
    async fn find_project(&self, id: i64) -> Result<Option<Project>, StoreError>;
    async fn update_project(&self, id: i64, name: &str) -> Result<Option<Project>, StoreError>;
    /// Deletes the project and its tasks.
    async fn delete_project(&self, id: i64) -> Result<bool, StoreError>;

    async fn list_tasks(&self, project_id: i64) -> Result<Vec<Task>, StoreError>;
    async fn insert_task(
        &self,
        project_id: i64,
        name: &str,
        description: &str,
    ) -> Result<Task, StoreError>;
    async fn find_task(&self, id: i64) -> Result<Option<Task>, StoreError>;
    async fn update_task(
        &self,
        id: i64,
        name: &str,
        description: &str,
    ) -> Result<Option<Task>, StoreError>;
    async fn delete_task(&self, id: i64) -> Result<bool, StoreError>;
}
