use std::sync::Arc;

use axum::{
    extract::State,
    http::HeaderMap,
    response::{IntoResponse, Redirect, Response},
    Json,
};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use serde::Serialize;
use tracing::debug;

use navigation_cell::apply_role_visibility;
use shared_config::AppConfig;
use shared_models::error::AppError;
use shared_utils::extractor::{ACCESS_TOKEN_COOKIE, ID_TOKEN_COOKIE};

use crate::provider::{CognitoSessionProvider, SessionProvider};

#[derive(Debug, Serialize)]
pub struct SessionInfo {
    pub subject: String,
    pub role: String,
    pub navigation: Vec<&'static str>,
}

pub async fn session_info(
    State(config): State<Arc<AppConfig>>,
    headers: HeaderMap,
) -> Result<Json<SessionInfo>, AppError> {
    let provider = CognitoSessionProvider::from_headers(config, &headers);

    let session = provider
        .session()
        .await
        .map_err(|_| AppError::Auth("No valid session".to_string()))?;
    debug!("Session info for {}", session.subject);

    let navigation = apply_role_visibility(&session.role)
        .into_iter()
        .filter(|item| item.visible)
        .map(|item| item.entry.element_id())
        .collect();

    Ok(Json(SessionInfo {
        subject: session.subject,
        role: session.role.to_string(),
        navigation,
    }))
}

/// Ends the session and restarts the app at the login page.
pub async fn sign_out(
    State(config): State<Arc<AppConfig>>,
    jar: CookieJar,
    headers: HeaderMap,
) -> Response {
    let provider = CognitoSessionProvider::from_headers(config, &headers);
    let outcome = provider.sign_out().await;

    let jar = jar
        .remove(Cookie::build((ACCESS_TOKEN_COOKIE, "")).path("/"))
        .remove(Cookie::build((ID_TOKEN_COOKIE, "")).path("/"));

    (jar, Redirect::to(&outcome.redirect_to)).into_response()
}
