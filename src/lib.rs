//! taskboard - multi-tenant Organization / Project / Task REST API
//!
//! # Modules
//!
//! - [`auth`] - Token codec, password hashing and the access service
//! - [`resources`] - CRUD services with presence validation and parent scoping
//! - [`store`] - Storage seams with in-memory and PostgreSQL backends
//! - [`gateway`] - axum router, bearer middleware and handlers
//! - [`config`] / [`logging`] - YAML config and tracing setup

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod gateway;
pub mod logging;
pub mod models;
pub mod resources;
pub mod store;

pub use auth::{AccessService, AuthError, AuthenticatedSubject, TokenCodec};
pub use config::{AppConfig, SigningSecret};
pub use error::{AppError, AppResult};
pub use models::{Organization, Project, Task, User};
pub use store::{MemoryStore, PgStore, ResourceStore};
