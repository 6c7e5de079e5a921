//! Process-local store backed by `DashMap` tables
//!
//! Used when no PostgreSQL URL is configured, and by the test suites.

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::sync::atomic::{AtomicI64, Ordering};

use super::{ResourceStore, StoreError};
use crate::auth::CredentialStore;
use crate::models::{Organization, Project, Task, User};

#[derive(Default)]
struct Sequence(AtomicI64);

impl Sequence {
    fn next(&self) -> i64 {
        self.0.fetch_add(1, Ordering::Relaxed) + 1
    }
}

#[derive(Default)]
pub struct MemoryStore {
    users: DashMap<i64, User>,
    /// email -> user id, guards uniqueness
    emails: DashMap<String, i64>,
    organizations: DashMap<i64, Organization>,
    projects: DashMap<i64, Project>,
    tasks: DashMap<i64, Task>,
    user_ids: Sequence,
    organization_ids: Sequence,
    project_ids: Sequence,
    task_ids: Sequence,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove a user. Tokens already issued for it stop resolving.
    pub fn remove_user(&self, id: i64) -> bool {
        match self.users.remove(&id) {
            Some((_, user)) => {
                self.emails.remove(&user.email);
                true
            }
            None => false,
        }
    }
}

fn sorted_by_id<T: Clone>(rows: impl Iterator<Item = T>, id: impl Fn(&T) -> i64) -> Vec<T> {
    let mut rows: Vec<T> = rows.collect();
    rows.sort_by_key(|row| id(row));
    rows
}

#[async_trait]
impl CredentialStore for MemoryStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let Some(id) = self.emails.get(email).map(|entry| *entry.value()) else {
            return Ok(None);
        };
        Ok(self.users.get(&id).map(|user| user.value().clone()))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, StoreError> {
        Ok(self.users.get(&id).map(|user| user.value().clone()))
    }

    async fn create_user(&self, email: &str, password_hash: &str) -> Result<User, StoreError> {
        match self.emails.entry(email.to_string()) {
            Entry::Occupied(_) => Err(StoreError::Conflict(
                "Email has already been taken".to_string(),
            )),
            Entry::Vacant(slot) => {
                let user = User {
                    id: self.user_ids.next(),
                    email: email.to_string(),
                    password_hash: password_hash.to_string(),
                    created_at: Utc::now(),
                };
                self.users.insert(user.id, user.clone());
                slot.insert(user.id);
                Ok(user)
            }
        }
    }
}

#[async_trait]
impl ResourceStore for MemoryStore {
    async fn insert_organization(&self, name: &str) -> Result<Organization, StoreError> {
        let now = Utc::now();
        let organization = Organization {
            id: self.organization_ids.next(),
            name: name.to_string(),
            created_at: now,
            updated_at: now,
        };
        self.organizations
            .insert(organization.id, organization.clone());
        Ok(organization)
    }

    async fn find_organization(&self, id: i64) -> Result<Option<Organization>, StoreError> {
        Ok(self.organizations.get(&id).map(|row| row.value().clone()))
    }

    async fn list_projects(&self, organization_id: i64) -> Result<Vec<Project>, StoreError> {
        Ok(sorted_by_id(
            self.projects
                .iter()
                .filter(|row| row.organization_id == organization_id)
                .map(|row| row.value().clone()),
            |project| project.id,
        ))
    }

    async fn insert_project(
        &self,
        organization_id: i64,
        name: &str,
    ) -> Result<Project, StoreError> {
        // Holding the parent guard orders this insert before any concurrent removal.
        let Some(_organization) = self.organizations.get(&organization_id) else {
            return Err(StoreError::MissingParent);
        };
        let now = Utc::now();
        let project = Project {
            id: self.project_ids.next(),
            name: name.to_string(),
            organization_id,
            created_at: now,
            updated_at: now,
        };
        self.projects.insert(project.id, project.clone());
        Ok(project)
    }

    async fn find_project(&self, id: i64) -> Result<Option<Project>, StoreError> {
        Ok(self.projects.get(&id).map(|row| row.value().clone()))
    }

    async fn update_project(&self, id: i64, name: &str) -> Result<Option<Project>, StoreError> {
        Ok(self.projects.get_mut(&id).map(|mut row| {
            row.name = name.to_string();
            row.updated_at = Utc::now();
            row.value().clone()
        }))
    }

    async fn delete_project(&self, id: i64) -> Result<bool, StoreError> {
        if self.projects.remove(&id).is_none() {
            return Ok(false);
        }
        self.tasks.retain(|_, task| task.project_id != id);
        Ok(true)
    }

    async fn list_tasks(&self, project_id: i64) -> Result<Vec<Task>, StoreError> {
        Ok(sorted_by_id(
            self.tasks
                .iter()
                .filter(|row| row.project_id == project_id)
                .map(|row| row.value().clone()),
            |task| task.id,
        ))
    }

    async fn insert_task(
        &self,
        project_id: i64,
        name: &str,
        description: &str,
    ) -> Result<Task, StoreError> {
        // delete_project removes the row before sweeping tasks, so a task
        // inserted under this guard is swept with it.
        let Some(_project) = self.projects.get(&project_id) else {
            return Err(StoreError::MissingParent);
        };
        let now = Utc::now();
        let task = Task {
            id: self.task_ids.next(),
            name: name.to_string(),
            description: description.to_string(),
            project_id,
            created_at: now,
            updated_at: now,
        };
        self.tasks.insert(task.id, task.clone());
        Ok(task)
    }

    async fn find_task(&self, id: i64) -> Result<Option<Task>, StoreError> {
        Ok(self.tasks.get(&id).map(|row| row.value().clone()))
    }

    async fn update_task(
        &self,
        id: i64,
        name: &str,
        description: &str,
    ) -> Result<Option<Task>, StoreError> {
        Ok(self.tasks.get_mut(&id).map(|mut row| {
            row.name = name.to_string();
            row.description = description.to_string();
            row.updated_at = Utc::now();
            row.value().clone()
        }))
    }

    async fn delete_task(&self, id: i64) -> Result<bool, StoreError> {
        Ok(self.tasks.remove(&id).is_some())
    }
}
