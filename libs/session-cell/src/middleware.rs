use std::sync::Arc;

use axum::{
    extract::State,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
    body::Body,
};

use shared_config::AppConfig;
use shared_models::auth::Session;

use crate::provider::{CognitoSessionProvider, SessionProvider};

/// Resolves the session before a page handler runs and makes it available
/// as an `Extension<Session>`. Without a valid session the browser is sent
/// to the login page and the handler never runs.
pub async fn session_middleware(
    State(config): State<Arc<AppConfig>>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let provider = CognitoSessionProvider::from_headers(config, request.headers());

    match provider.session().await {
        Ok(session) => {
            request.extensions_mut().insert::<Session>(session);
            next.run(request).await
        }
        Err(login) => login.into_response(),
    }
}
