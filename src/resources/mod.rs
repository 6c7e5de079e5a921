//! CRUD services for the Organization -> Project -> Task hierarchy
//!
//! Each service validates presence rules, enforces parent scoping (a child
//! looked up under the wrong parent is [`AppError::NotFound`]) and delegates
//! persistence to a [`ResourceStore`](crate::store::ResourceStore).

pub mod organizations;
pub mod projects;
pub mod tasks;
pub mod users;

use crate::error::AppError;

/// Blank means empty or whitespace only.
pub(crate) fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Collects "<Field> can't be blank" messages.
#[derive(Default)]
pub(crate) struct Presence(Vec<String>);

impl Presence {
    pub(crate) fn require(mut self, field: &str, value: Option<&str>) -> Self {
        if value.is_none_or(is_blank) {
            self.0.push(format!("{} can't be blank", field));
        }
        self
    }

    pub(crate) fn finish(self) -> Result<(), AppError> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(AppError::ValidationFailed(self.0))
        }
    }
}
