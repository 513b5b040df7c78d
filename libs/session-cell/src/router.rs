use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};

use shared_config::AppConfig;

use crate::handlers;

pub fn session_routes(state: Arc<AppConfig>) -> Router {
    Router::new()
        .route("/session", get(handlers::session_info))
        .route("/logout", post(handlers::sign_out))
        .with_state(state)
}
