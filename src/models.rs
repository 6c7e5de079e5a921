//! Records shared by the storage backends, the services and the HTTP layer

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

/// User account (credential record).
///
/// `password_hash` is a PHC-format argon2 string and is never serialized.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Public view of a user, safe to return over the API.
#[derive(Debug, Serialize, ToSchema)]
pub struct UserView {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "a@b.com")]
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserView {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            created_at: user.created_at,
        }
    }
}

/// Tenant. Owns projects.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Organization {
    pub id: i64,
    #[schema(example = "Acme")]
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Project {
    pub id: i64,
    #[schema(example = "Website relaunch")]
    pub name: String,
    pub organization_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Task {
    pub id: i64,
    #[schema(example = "Draft copy")]
    pub name: String,
    #[schema(example = "First pass at the landing page text")]
    pub description: String,
    pub project_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_view_hides_password_hash() {
        let user = User {
            id: 7,
            email: "a@b.com".to_string(),
            password_hash: "$argon2id$v=19$secret".to_string(),
            created_at: Utc::now(),
        };
        let json = serde_json::to_string(&UserView::from(&user)).unwrap();
        assert!(json.contains("a@b.com"));
        assert!(!json.contains("argon2"));
    }
}
