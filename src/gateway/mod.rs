//! HTTP gateway: router, bearer middleware and server loop

pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod state;
pub mod types;

use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, post},
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::GatewayConfig;
use handlers::{organizations, projects, tasks};
use state::AppState;

/// Build the complete router over `state`.
pub fn build_router(state: AppState) -> Router {
    let state = Arc::new(state);

    // ==========================================================================
    // Public Routes (no auth required)
    // ==========================================================================
    let public_routes = Router::new()
        .route("/health", get(handlers::health_check))
        .route("/users", post(handlers::register))
        .route("/authentication", post(handlers::login));

    // ==========================================================================
    // Protected Routes (bearer token required)
    // ==========================================================================
    let protected_routes = Router::new()
        .route("/organizations", post(organizations::create_organization))
        .route("/organizations/{id}", get(organizations::show_organization))
        .route(
            "/organizations/{organization_id}/projects",
            get(projects::list_projects).post(projects::create_project),
        )
        .route(
            "/organizations/{organization_id}/projects/{id}",
            get(projects::show_project)
                .patch(projects::update_project)
                .delete(projects::delete_project),
        )
        .route(
            "/projects/{project_id}/tasks",
            get(tasks::list_tasks).post(tasks::create_task),
        )
        .route(
            "/projects/{project_id}/tasks/{id}",
            get(tasks::show_task)
                .patch(tasks::update_task)
                .delete(tasks::delete_task),
        )
        .route_layer(from_fn_with_state(
            state.clone(),
            middleware::bearer_auth_middleware,
        ));

    Router::new()
        .nest("/api/v1", public_routes.merge(protected_routes))
        .with_state(state)
        // Stateless, added after with_state
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", openapi::ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
}

/// Bind `host:port` and serve until Ctrl-C.
pub async fn run_server(config: &GatewayConfig, state: AppState) -> std::io::Result<()> {
    let app = build_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = TcpListener::bind(&addr).await.inspect_err(|e| {
        tracing::error!("Failed to bind to {}: {}", addr, e);
    })?;

    tracing::info!("Gateway listening on http://{}", addr);
    tracing::info!("API Docs: http://{}/docs", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, draining connections");
}
