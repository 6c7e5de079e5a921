use std::sync::Arc;

use crate::auth::{AccessService, CredentialStore};
use crate::db::Database;
use crate::store::ResourceStore;

/// Gateway shared state, built once at startup.
#[derive(Clone)]
pub struct AppState {
    /// Token issuance and validation
    pub access: Arc<AccessService>,
    /// User records (registration)
    pub credentials: Arc<dyn CredentialStore>,
    /// Organization / project / task rows
    pub resources: Arc<dyn ResourceStore>,
    /// PostgreSQL pool, pinged by the health check (None in memory mode)
    pub database: Option<Arc<Database>>,
}

impl AppState {
    pub fn new(
        access: Arc<AccessService>,
        credentials: Arc<dyn CredentialStore>,
        resources: Arc<dyn ResourceStore>,
    ) -> Self {
        Self {
            access,
            credentials,
            resources,
            database: None,
        }
    }

    pub fn with_database(mut self, database: Arc<Database>) -> Self {
        self.database = Some(database);
        self
    }
}
