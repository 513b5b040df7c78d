use std::sync::Arc;

use assert_matches::assert_matches;
use serde_json::json;
use axum::http::{header::COOKIE, HeaderMap, HeaderValue};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use session_cell::{CognitoSessionProvider, SessionProvider};
use shared_models::auth::Role;
use shared_utils::extractor::SessionTokens;
use shared_utils::test_utils::{JwtTestUtils, TestConfig, TestUser};

fn expiry_in_an_hour() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_secs()
        + 3600
}

fn cookie_headers(value: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(COOKIE, HeaderValue::from_str(value).unwrap());
    headers
}

#[tokio::test]
async fn test_session_from_valid_cookies() {
    let config = TestConfig::default().to_arc();
    let user = TestUser::appointments_admin();
    let headers = cookie_headers(&JwtTestUtils::session_cookie(&user, &config.session_jwt_secret));

    let provider = CognitoSessionProvider::from_headers(config, &headers);
    let session = provider.session().await.unwrap();

    assert_eq!(session.bearer_token, format!("access-{}", user.id));
    assert_eq!(session.role, Role::AppointmentsAdmin);
    assert_eq!(session.subject, user.id);
    assert_eq!(provider.token().await.unwrap(), format!("access-{}", user.id));
    assert_eq!(provider.role().await.unwrap(), Role::AppointmentsAdmin);
}

#[tokio::test]
async fn test_missing_session_requires_login() {
    let config = TestConfig::default().to_arc();
    let provider = CognitoSessionProvider::from_headers(config, &HeaderMap::new());

    let err = provider.session().await.unwrap_err();
    assert_eq!(err.login_url, "/");
    assert!(provider.token().await.is_err());
    assert!(provider.role().await.is_err());
}

#[tokio::test]
async fn test_expired_or_forged_tokens_require_login() {
    let config = TestConfig::default().to_arc();
    let user = TestUser::operations_staff();

    for id_token in [
        JwtTestUtils::create_expired_token(&user, &config.session_jwt_secret),
        JwtTestUtils::create_invalid_signature_token(&user),
        JwtTestUtils::create_malformed_token(),
        JwtTestUtils::sign_claims(
            &json!({
                "sub": user.id,
                "cognito:groups": [user.group],
                "iss": "https://cognito-idp.us-east-2.amazonaws.com/us-east-2_OtherPool",
                "aud": "test-client-id",
                "exp": expiry_in_an_hour(),
            }),
            &config.session_jwt_secret,
        ),
    ] {
        let provider = CognitoSessionProvider::new(
            config.clone(),
            Some(SessionTokens { access_token: "access".into(), id_token }),
        );
        assert_matches!(provider.session().await, Err(_));
    }
}

#[tokio::test]
async fn test_sign_out_revokes_globally() {
    let identity = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/"))
        .and(header("X-Amz-Target", "AWSCognitoIdentityProviderService.GlobalSignOut"))
        .and(header("content-type", "application/x-amz-json-1.1"))
        .and(body_json(serde_json::json!({ "AccessToken": "access-token" })))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .expect(1)
        .mount(&identity)
        .await;

    let config = TestConfig { identity_endpoint: identity.uri(), ..TestConfig::default() };
    let provider = CognitoSessionProvider::new(
        config.to_arc(),
        Some(SessionTokens { access_token: "access-token".into(), id_token: "id".into() }),
    );

    let outcome = provider.sign_out().await;
    assert!(outcome.revoked);
    assert_eq!(outcome.redirect_to, "/");
}

#[tokio::test]
async fn test_sign_out_still_restarts_when_revocation_fails() {
    let identity = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(400))
        .mount(&identity)
        .await;

    let config = TestConfig { identity_endpoint: identity.uri(), ..TestConfig::default() };
    let provider = CognitoSessionProvider::new(
        Arc::new(config.to_app_config()),
        Some(SessionTokens { access_token: "revoked".into(), id_token: "id".into() }),
    );

    let outcome = provider.sign_out().await;
    assert!(!outcome.revoked);
    assert_eq!(outcome.redirect_to, "/");
}
