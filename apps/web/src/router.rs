use std::sync::Arc;

use axum::{
    extract::State,
    http::HeaderMap,
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Router,
};

use appointment_cell::appointment_routes;
use dashboard_cell::dashboard_routes;
use session_cell::{session_routes, CognitoSessionProvider, SessionProvider};
use settings_cell::settings_routes;
use shared_config::AppConfig;

const LOGIN_PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head><meta charset="utf-8" /><title>Sign in | EHR Dashboard</title></head>
<body class="login">
    <main class="login-card">
        <h1>EHR Dashboard</h1>
        <p>Sign in with your organization account to continue.</p>
    </main>
</body>
</html>"#;

/// Signed-in users go straight to the landing page.
async fn login_page(State(config): State<Arc<AppConfig>>, headers: HeaderMap) -> Response {
    let provider = CognitoSessionProvider::from_headers(Arc::clone(&config), &headers);
    match provider.session().await {
        Ok(_) => Redirect::to(&config.landing_path).into_response(),
        Err(_) => Html(LOGIN_PAGE).into_response(),
    }
}

pub fn create_router(state: Arc<AppConfig>) -> Router {
    Router::new()
        .route("/", get(login_page))
        .with_state(Arc::clone(&state))
        .merge(session_routes(state.clone()))
        .merge(dashboard_routes(state.clone()))
        .merge(appointment_routes(state.clone()))
        .merge(settings_routes(state))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
    };
    use tower::ServiceExt;
    use shared_utils::test_utils::{JwtTestUtils, TestConfig, TestUser};

    #[tokio::test]
    async fn test_root_shows_login_without_session() {
        let app = create_router(TestConfig::default().to_arc());
        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_root_forwards_signed_in_user() {
        let config = TestConfig::default();
        let cookie = JwtTestUtils::session_cookie(&TestUser::operations_staff(), &config.jwt_secret);
        let app = create_router(config.to_arc());

        let response = app
            .oneshot(Request::builder().uri("/").header(header::COOKIE, cookie).body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/dashboard");
    }

    #[tokio::test]
    async fn test_pages_are_mounted() {
        let app = create_router(TestConfig::default().to_arc());

        for uri in ["/dashboard", "/appointments", "/settings"] {
            let response = app
                .clone()
                .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::SEE_OTHER, "{}", uri);
            assert_eq!(response.headers()[header::LOCATION], "/");
        }
    }
}
