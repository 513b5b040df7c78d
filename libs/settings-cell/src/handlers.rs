// libs/settings-cell/src/handlers.rs
use std::collections::HashMap;

use axum::{
    extract::{Extension, Form, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use tracing::warn;

use feedback_cell::Feedback;
use navigation_cell::{guard_page, render_page, NavEntry, Page, PageExit, PageShell};
use shared_models::auth::Session;

use crate::panel::SettingsPanel;
use crate::state::{SettingsState, SharedPanel};
use crate::views::render_panel;

// ==============================================================================
// HELPERS
// ==============================================================================

/// The panel lock is never held across a backend call.
async fn ensure_open(state: &SettingsState, session: &Session, panel: &SharedPanel, feedback: &mut Feedback) {
    let ticket = panel.lock().await.open(feedback);

    if let Some(ticket) = ticket {
        let result = state.api().list(&session.bearer_token).await;
        if let Err(e) = panel.lock().await.finish_load(ticket, result, feedback) {
            warn!("Settings load dropped: {}", e);
        }
    }
}

fn render(session: &Session, panel: &SettingsPanel, feedback: &Feedback) -> Response {
    let body = render_panel(panel, feedback);
    let shell = PageShell::new("Settings", NavEntry::Dashboard, &session.role, feedback, body);
    Html(render_page(&shell)).into_response()
}

async fn finish(state: &SettingsState, session: &Session, panel: SharedPanel, feedback: &Feedback) -> Response {
    let response = render(session, &*panel.lock().await, feedback);
    state.release(&session.subject, panel).await;
    response
}

// ==============================================================================
// HANDLERS
// ==============================================================================

pub async fn settings_page(
    State(state): State<SettingsState>,
    Extension(session): Extension<Session>,
) -> Result<Response, PageExit> {
    guard_page(Page::Settings, &session.role, &state.config.landing_path)?;

    let mut feedback = Feedback::new();
    let panel = state.panel(&session.subject).await;
    ensure_open(&state, &session, &panel, &mut feedback).await;

    Ok(finish(&state, &session, panel, &feedback).await)
}

pub async fn save_settings(
    State(state): State<SettingsState>,
    Extension(session): Extension<Session>,
    Form(form): Form<HashMap<String, String>>,
) -> Result<Response, PageExit> {
    guard_page(Page::Settings, &session.role, &state.config.landing_path)?;

    let mut feedback = Feedback::new();
    let panel = state.panel(&session.subject).await;
    ensure_open(&state, &session, &panel, &mut feedback).await;

    let mut edits: Vec<_> = form.into_iter().collect();
    edits.sort();

    // Inputs and the move to Saving happen under one lock, so a second
    // request sees the save in flight.
    let started = {
        let mut guard = panel.lock().await;
        for (name, value) in edits {
            if let Err(e) = guard.set_input(&name, value) {
                warn!("Ignoring settings input: {}", e);
            }
        }
        guard.submit(&mut feedback)
    };

    match started {
        Ok(save) => {
            let result = state.api().save(&session.bearer_token, &save.changes).await;
            if let Err(e) = panel.lock().await.finish_save(save.ticket, result, &mut feedback) {
                warn!("Settings save dropped: {}", e);
            }
        }
        Err(e) => warn!("Settings save rejected: {}", e),
    }

    Ok(finish(&state, &session, panel, &feedback).await)
}

pub async fn close_settings(
    State(state): State<SettingsState>,
    Extension(session): Extension<Session>,
) -> Response {
    let panel = state.panel(&session.subject).await;
    panel.lock().await.close(&mut Feedback::new());
    state.release(&session.subject, panel).await;

    Redirect::to(&state.config.landing_path).into_response()
}
