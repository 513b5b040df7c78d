use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use thiserror::Error;
use tracing::debug;

use shared_config::AppConfig;
use shared_models::auth::IdTokenClaims;

type HmacSha256 = Hmac<Sha256>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("session secret is not set")]
    MissingSecret,
    #[error("invalid token format")]
    Malformed,
    #[error("invalid signature encoding")]
    SignatureEncoding,
    #[error("invalid token signature")]
    BadSignature,
    #[error("invalid claims encoding")]
    ClaimsEncoding,
    #[error("invalid claims format")]
    ClaimsFormat,
    #[error("token expired")]
    Expired,
    #[error("token was issued by another identity pool")]
    Issuer,
    #[error("token was issued for another client")]
    Audience,
}

/// Verifies an HS256-signed id token and returns its claims.
///
/// Issuer and audience are only checked once the identity pool is configured.
pub fn validate_id_token(token: &str, config: &AppConfig) -> Result<IdTokenClaims, TokenError> {
    validate_id_token_at(token, config, chrono::Utc::now().timestamp())
}

pub fn validate_id_token_at(token: &str, config: &AppConfig, now: i64) -> Result<IdTokenClaims, TokenError> {
    let secret = config.session_jwt_secret.as_str();
    if secret.is_empty() {
        return Err(TokenError::MissingSecret);
    }

    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() != 3 {
        return Err(TokenError::Malformed);
    }

    let header_b64 = parts[0];
    let claims_b64 = parts[1];
    let signature_b64 = parts[2];

    let signature = URL_SAFE_NO_PAD.decode(signature_b64).map_err(|e| {
        debug!("Failed to decode signature: {}", e);
        TokenError::SignatureEncoding
    })?;

    let signing_input = format!("{}.{}", header_b64, claims_b64);

    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|_| TokenError::BadSignature)?;
    mac.update(signing_input.as_bytes());

    if mac.verify_slice(&signature).is_err() {
        debug!("Token signature verification failed");
        return Err(TokenError::BadSignature);
    }

    let claims_json = URL_SAFE_NO_PAD
        .decode(claims_b64)
        .ok()
        .and_then(|bytes| String::from_utf8(bytes).ok())
        .ok_or(TokenError::ClaimsEncoding)?;

    let claims: IdTokenClaims = serde_json::from_str(&claims_json).map_err(|e| {
        debug!("Failed to parse claims: {}", e);
        TokenError::ClaimsFormat
    })?;

    if let Some(exp) = claims.exp {
        if (exp as i64) < now {
            debug!("Token expired at {} (now: {})", exp, now);
            return Err(TokenError::Expired);
        }
    }

    if config.is_identity_configured() {
        let issuer = config.identity_issuer();
        let issued_by = claims
            .iss
            .as_deref()
            .map(|iss| iss.strip_prefix("https://").unwrap_or(iss));
        if issued_by != Some(issuer.as_str()) {
            debug!("Token issuer {:?} does not match {}", claims.iss, issuer);
            return Err(TokenError::Issuer);
        }

        if claims.aud.as_deref() != Some(config.client_id.as_str()) {
            debug!("Token audience {:?} does not match client", claims.aud);
            return Err(TokenError::Audience);
        }
    }

    debug!("Id token validated for subject: {}", claims.sub);
    Ok(claims)
}
