// libs/appointment-cell/src/router.rs
use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};

use shared_config::AppConfig;

use crate::handlers;
use crate::state::AppointmentState;

pub fn appointment_routes(config: Arc<AppConfig>) -> Router {
    let state = AppointmentState::new(config);

    Router::new()
        .route("/appointments", get(handlers::appointments_page))
        .route("/appointments/save", post(handlers::save_appointment))
        .route("/appointments/{appointment_id}/delete", post(handlers::delete_appointment))
        .with_state(state)
}
