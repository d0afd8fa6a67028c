use axum::{
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::AppState;

/// Build the application router with all routes
pub fn build(state: Arc<AppState>, frontend_dir: &str) -> Router {
    Router::new()
        // Workspace routes
        .route("/api/workspace", get(handlers::tabs::get_workspace))
        // Tab routes
        .route("/api/tabs", get(handlers::tabs::list_tabs))
        .route("/api/tabs", post(handlers::tabs::create_tab))
        .route("/api/tabs/:id", get(handlers::tabs::get_tab))
        .route("/api/tabs/:id", put(handlers::tabs::update_tab))
        .route("/api/tabs/:id", delete(handlers::tabs::delete_tab))
        .route("/api/tabs/:id/activate", post(handlers::tabs::activate_tab))
        .route("/api/tabs/:id/content", put(handlers::tabs::update_content))
        .route("/api/tabs/:id/variables", put(handlers::tabs::update_variables))
        // Template engine routes
        .route("/api/variables/extract", post(handlers::render::extract_variables))
        .route("/api/render", post(handlers::render::render))
        .route("/api/tabs/:id/generate", post(handlers::render::generate_tab))
        .route("/api/tabs/:id/export", get(handlers::export::export_tab))
        // Healthcheck
        .route("/api/health", get(handlers::healthcheck))
        // Static files (frontend)
        .nest_service("/assets", ServeDir::new(format!("{}/assets", frontend_dir)))
        .fallback_service(ServeDir::new(frontend_dir).fallback(
            tower_http::services::ServeFile::new(format!("{}/index.html", frontend_dir)),
        ))
        // Add state and middleware
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}
