use axum::http::{header::AUTHORIZATION, HeaderMap};
use axum_extra::extract::CookieJar;

pub const ACCESS_TOKEN_COOKIE: &str = "ehr_access_token";
pub const ID_TOKEN_COOKIE: &str = "ehr_id_token";

/// Raw tokens handed over by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionTokens {
    pub access_token: String,
    pub id_token: String,
}

/// Pulls the session tokens from the session cookies. Without cookies, an
/// `Authorization` header carrying a single token is accepted for both roles.
pub fn extract_session_tokens(headers: &HeaderMap) -> Option<SessionTokens> {
    let jar = CookieJar::from_headers(headers);

    let access = jar.get(ACCESS_TOKEN_COOKIE).map(|c| c.value().to_string());
    let id = jar.get(ID_TOKEN_COOKIE).map(|c| c.value().to_string());

    match (access, id) {
        (Some(access_token), Some(id_token)) if !access_token.is_empty() && !id_token.is_empty() => {
            Some(SessionTokens { access_token, id_token })
        }
        _ => extract_authorization_token(headers).map(|token| SessionTokens {
            access_token: token.clone(),
            id_token: token,
        }),
    }
}

fn extract_authorization_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ").unwrap_or(value).trim();

    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}
