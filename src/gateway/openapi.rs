//! OpenAPI / Swagger UI Documentation
//!
//! - Swagger UI: `http://localhost:8080/docs`
//! - OpenAPI JSON: `http://localhost:8080/api-docs/openapi.json`

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::gateway::handlers::{HealthResponse, LoginCredentials, LoginRequest, TokenResponse};
use crate::models::{Organization, Project, Task, UserView};
use crate::resources::{
    organizations::OrganizationParams, projects::ProjectParams, tasks::TaskParams,
    users::RegisterParams,
};

/// JWT bearer security scheme
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some(
                            "Token from POST /api/v1/authentication: `Authorization: Bearer <token>`",
                        ))
                        .build(),
                ),
            );
        }
    }
}

/// Main API Documentation struct
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Taskboard API",
        version = "1.0.0",
        description = "Organizations, projects and tasks behind stateless JWT authentication.",
        license(
            name = "MIT"
        )
    ),
    servers(
        (url = "http://localhost:8080", description = "Development"),
    ),
    paths(
        crate::gateway::handlers::health::health_check,
        crate::gateway::handlers::auth::register,
        crate::gateway::handlers::auth::login,
        crate::gateway::handlers::organizations::create_organization,
        crate::gateway::handlers::organizations::show_organization,
        crate::gateway::handlers::projects::list_projects,
        crate::gateway::handlers::projects::create_project,
        crate::gateway::handlers::projects::show_project,
        crate::gateway::handlers::projects::update_project,
        crate::gateway::handlers::projects::delete_project,
        crate::gateway::handlers::tasks::list_tasks,
        crate::gateway::handlers::tasks::create_task,
        crate::gateway::handlers::tasks::show_task,
        crate::gateway::handlers::tasks::update_task,
        crate::gateway::handlers::tasks::delete_task,
    ),
    components(
        schemas(
            HealthResponse,
            LoginRequest,
            LoginCredentials,
            TokenResponse,
            RegisterParams,
            UserView,
            Organization,
            OrganizationParams,
            Project,
            ProjectParams,
            Task,
            TaskParams,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Auth", description = "Registration and token issuance"),
        (name = "Organizations", description = "Organizations (auth required)"),
        (name = "Projects", description = "Projects scoped to an organization (auth required)"),
        (name = "Tasks", description = "Tasks scoped to a project (auth required)"),
        (name = "System", description = "Health checks and system info")
    )
)]
pub struct ApiDoc;
