// libs/dashboard-cell/src/router.rs
use std::sync::Arc;

use axum::{routing::get, Router};

use shared_config::AppConfig;

use crate::handlers;

pub fn dashboard_routes(state: Arc<AppConfig>) -> Router {
    Router::new()
        .route("/dashboard", get(handlers::dashboard_page))
        .with_state(state)
}
