// Library crate for the task tracker
// Exports modules for use by the server binary and tests

pub mod config;
pub mod entity;
pub mod error;
pub mod handlers;
pub mod middlewares;
pub mod models;
pub mod repositories;
pub mod services;
pub mod state;

use axum::{middleware, routing::get, routing::post, Json, Router};
use serde_json::json;
use tower_http::trace::TraceLayer;

use crate::handlers::{
    create_project, create_task, delete_task, index, login, login_page, logout, register,
    register_page, toggle_task,
};
use crate::middlewares::auth_middleware;
use crate::state::AppState;

/// Build the application router with the given state
pub fn build_router(state: AppState) -> Router {
    // Protected routes (require a session)
    let protected_routes = Router::new()
        .route("/", get(index))
        .route("/logout", get(logout))
        // Project routes
        .route("/crear_proyecto", post(create_project))
        // Task routes
        .route("/agregar", post(create_task))
        .route("/completar/{tarea_id}", get(toggle_task))
        .route("/eliminar/{tarea_id}", get(delete_task))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .route("/health", get(|| async { Json(json!({ "status": "ok" })) }))
        // Public auth routes
        .route("/registro", get(register_page).post(register))
        .route("/login", get(login_page).post(login))
        // Protected routes
        .merge(protected_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
