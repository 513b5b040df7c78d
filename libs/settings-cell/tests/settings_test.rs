use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use std::time::Duration;

use serde_json::json;
use tower::ServiceExt;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use settings_cell::panel::{SAVED, SAVE_FAILED};
use settings_cell::{settings_routes, Setting, SettingsApi};
use shared_backend::ResourceClient;
use shared_utils::test_utils::{JwtTestUtils, MockBackendResponses, TestConfig, TestUser};

async fn body_text(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn mount_settings(server: &MockServer, expected_fetches: u64) {
    Mock::given(method("GET"))
        .and(path("/api/settings/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockBackendResponses::setting("prior_period", "30"),
            MockBackendResponses::setting("subsequent_period", "45"),
        ])))
        .expect(expected_fetches)
        .mount(server)
        .await;
}

fn get(uri: &str, cookie: &str) -> Request<Body> {
    Request::builder().uri(uri).header(header::COOKIE, cookie).body(Body::empty()).unwrap()
}

fn post_form(uri: &str, cookie: &str, form: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::COOKIE, cookie)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(form.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_save_posts_each_setting_in_order() {
    let server = MockServer::start().await;
    for (name, value) in [("prior_period", "20"), ("subsequent_period", "25")] {
        Mock::given(method("POST"))
            .and(path(format!("/api/settings/{}", name)))
            .and(body_json(json!({ "name": name, "value": value })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "name": name, "value": value })))
            .expect(1)
            .mount(&server)
            .await;
    }

    let api = SettingsApi::new(ResourceClient::with_base_url(&server.uri()));
    let changes = vec![Setting::new("prior_period", "20"), Setting::new("subsequent_period", "25")];
    api.save("token", &changes).await.unwrap();
}

#[tokio::test]
async fn test_settings_require_session() {
    let config = TestConfig::default();
    let request = Request::builder().uri("/settings").body(Body::empty()).unwrap();

    let response = settings_routes(config.to_arc()).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/");
}

#[tokio::test]
async fn test_reopening_uses_cache_until_closed() {
    let server = MockServer::start().await;
    mount_settings(&server, 2).await;
    let config = TestConfig::with_backend(&server.uri());
    let cookie = JwtTestUtils::session_cookie(&TestUser::facility_staff(), &config.jwt_secret);
    let app: Router = settings_routes(config.to_arc());

    let html = body_text(app.clone().oneshot(get("/settings", &cookie)).await.unwrap()).await;
    assert!(html.contains(r#"<span id="prior_period_text">30</span>"#));
    assert!(html.contains(r#"value="45""#));

    // Served from the panel cache.
    let response = app.clone().oneshot(get("/settings", &cookie)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let closed = app.clone().oneshot(post_form("/settings/close", &cookie, "")).await.unwrap();
    assert_eq!(closed.status(), StatusCode::SEE_OTHER);
    assert_eq!(closed.headers()[header::LOCATION], "/dashboard");

    app.oneshot(get("/settings", &cookie)).await.unwrap();
}

#[tokio::test]
async fn test_save_sends_only_changed_setting() {
    let server = MockServer::start().await;
    mount_settings(&server, 1).await;
    Mock::given(method("POST"))
        .and(path("/api/settings/subsequent_period"))
        .and(body_json(json!({ "name": "subsequent_period", "value": "60" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/settings/prior_period"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let config = TestConfig::with_backend(&server.uri());
    let cookie = JwtTestUtils::session_cookie(&TestUser::appointments_admin(), &config.jwt_secret);
    let app = settings_routes(config.to_arc());

    let response = app
        .oneshot(post_form("/settings", &cookie, "prior_period=30&subsequent_period=60"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains(SAVED));
    assert!(html.contains(r#"data-dismiss-after="3000""#));
    assert!(html.contains("settings-modal d-none"));
}

#[tokio::test]
async fn test_value_below_minimum_is_not_sent() {
    let server = MockServer::start().await;
    mount_settings(&server, 1).await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let config = TestConfig::with_backend(&server.uri());
    let cookie = JwtTestUtils::session_cookie(&TestUser::appointments_admin(), &config.jwt_secret);

    let response = settings_routes(config.to_arc())
        .oneshot(post_form("/settings", &cookie, "prior_period=14&subsequent_period=60"))
        .await
        .unwrap();

    let html = body_text(response).await;
    assert!(html.contains(r#"disabled="disabled""#));
    assert!(html.contains(r#"<span id="prior_period_text">30</span>"#));
}

#[tokio::test]
async fn test_backend_failure_keeps_panel_open() {
    let server = MockServer::start().await;
    mount_settings(&server, 1).await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let config = TestConfig::with_backend(&server.uri());
    let cookie = JwtTestUtils::session_cookie(&TestUser::appointments_admin(), &config.jwt_secret);

    let response = settings_routes(config.to_arc())
        .oneshot(post_form("/settings", &cookie, "prior_period=20&subsequent_period=45"))
        .await
        .unwrap();

    let html = body_text(response).await;
    assert!(html.contains(SAVE_FAILED));
    assert!(html.contains(r#"value="20""#));
}

#[tokio::test]
async fn test_concurrent_saves_post_once() {
    let server = MockServer::start().await;
    mount_settings(&server, 1).await;
    for name in ["prior_period", "subsequent_period"] {
        Mock::given(method("POST"))
            .and(path(format!("/api/settings/{}", name)))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({}))
                    .set_delay(Duration::from_millis(300)),
            )
            .expect(1)
            .mount(&server)
            .await;
    }

    let config = TestConfig::with_backend(&server.uri());
    let cookie = JwtTestUtils::session_cookie(&TestUser::appointments_admin(), &config.jwt_secret);
    let app = settings_routes(config.to_arc());
    let form = "prior_period=20&subsequent_period=25";

    let (first, second) = tokio::join!(
        app.clone().oneshot(post_form("/settings", &cookie, form)),
        async {
            tokio::time::sleep(Duration::from_millis(100)).await;
            app.clone().oneshot(post_form("/settings", &cookie, form)).await
        }
    );

    let pages = [body_text(first.unwrap()).await, body_text(second.unwrap()).await];
    assert_eq!(pages.iter().filter(|html| html.contains(SAVED)).count(), 1);
}
