//! HTTP API - routes over the action log and its analytics
//!
//! Endpoints:
//! - `GET /health` - liveness probe
//! - `GET /users/:id` - user lookup
//! - `GET /users/:id/actions/count` - per-user action count
//! - `GET /users/referral-index` - transitive referral reach per user
//! - `GET /actions/:action_type/next` - next-action probabilities

pub mod routes;

use axum::{routing::get, Router};
use std::sync::Arc;

use crate::store::{ActionStore, UserStore};

/// State shared across handlers. The stores are immutable after load, so
/// no lock is needed.
pub struct AppState {
    pub users: UserStore,
    pub actions: ActionStore,
}

pub type SharedState = Arc<AppState>;

/// Create the API router
pub fn create_router(state: SharedState) -> Router {
    Router::new()
        .route("/health", get(routes::health))
        .route("/users/:id", get(routes::get_user))
        .route("/users/:id/actions/count", get(routes::action_count))
        .route("/users/referral-index", get(routes::referral_index))
        .route(
            "/actions/:action_type/next",
            get(routes::next_action_probabilities),
        )
        .with_state(state)
}
