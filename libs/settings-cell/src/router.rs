// libs/settings-cell/src/router.rs
use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use session_cell::middleware::session_middleware;
use shared_config::AppConfig;

use crate::handlers;
use crate::state::SettingsState;

pub fn settings_routes(config: Arc<AppConfig>) -> Router {
    let state = SettingsState::new(Arc::clone(&config));

    Router::new()
        .route("/settings", get(handlers::settings_page).post(handlers::save_settings))
        .route("/settings/close", post(handlers::close_settings))
        .route_layer(middleware::from_fn_with_state(config, session_middleware))
        .with_state(state)
}
