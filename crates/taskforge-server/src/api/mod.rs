//! HTTP API for the `TaskForge` server.

pub mod auth_routes;
pub mod error;
pub mod health;
pub mod middleware;
pub mod task_routes;
pub mod user_routes;

#[cfg(test)]
mod test_helpers;

#[cfg(test)]
mod user_routes_tests;

pub use error::ApiError;

use std::sync::Arc;

use axum::Router;
use axum::http::Method;
use axum::middleware::from_fn_with_state;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::auth::session::SessionManager;
use crate::storage::Database;

/// Shared application state, cloned per request.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub sessions: Arc<SessionManager>,
}

/// Build the full API router with session, CORS, and trace layers applied.
///
/// The session middleware wraps only the routes that consume an identity;
/// login, registration, and the health probe stay outside it so a stale
/// cookie can never lock a client out of re-authenticating.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_origin(Any)
        .allow_headers(Any);

    let protected = Router::new()
        .route("/api/v1/users/me", get(user_routes::me))
        .route("/api/v1/users/all", get(user_routes::all_users))
        .route(
            "/api/v1/users/{user_id}",
            get(user_routes::get_user).delete(user_routes::delete_user),
        )
        .route("/api/v1/tasks/task", post(task_routes::create_task))
        .route("/api/v1/tasks/all", get(task_routes::all_tasks))
        .route(
            "/api/v1/tasks/{task_id}",
            get(task_routes::get_task)
                .put(task_routes::update_task)
                .delete(task_routes::delete_task),
        )
        .layer(from_fn_with_state(state.clone(), middleware::session));

    Router::new()
        .route("/api/v1/health/check", get(health::health_check))
        .route("/api/v1/auth/register", post(auth_routes::register))
        .route("/api/v1/auth/login", post(auth_routes::login))
        .merge(protected)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
