use std::sync::Arc;

use async_trait::async_trait;
use axum::http::HeaderMap;
use tracing::{debug, info, warn};

use shared_config::AppConfig;
use shared_models::auth::{LoginRequired, Role, Session};
use shared_utils::extractor::{extract_session_tokens, SessionTokens};
use shared_utils::jwt::validate_id_token;

use crate::identity::IdentityClient;

/// Outcome of signing out: where the app restarts and whether the identity
/// provider confirmed the revocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignOut {
    pub redirect_to: String,
    pub revoked: bool,
}

/// Source of the current session. Callers never see an error other than
/// [`LoginRequired`], which always means "leave this page for the login page".
#[async_trait]
pub trait SessionProvider: Send + Sync {
    async fn session(&self) -> Result<Session, LoginRequired>;

    async fn token(&self) -> Result<String, LoginRequired> {
        Ok(self.session().await?.bearer_token)
    }

    async fn role(&self) -> Result<Role, LoginRequired> {
        Ok(self.session().await?.role)
    }

    async fn sign_out(&self) -> SignOut;
}

/// Session backed by the tokens the hosted identity provider issued.
pub struct CognitoSessionProvider {
    config: Arc<AppConfig>,
    tokens: Option<SessionTokens>,
    identity: IdentityClient,
}

impl CognitoSessionProvider {
    pub fn new(config: Arc<AppConfig>, tokens: Option<SessionTokens>) -> Self {
        let identity = IdentityClient::new(&config);
        Self { config, tokens, identity }
    }

    pub fn from_headers(config: Arc<AppConfig>, headers: &HeaderMap) -> Self {
        Self::new(config, extract_session_tokens(headers))
    }

    fn login_required(&self) -> LoginRequired {
        LoginRequired::new(self.config.login_url.clone())
    }
}

#[async_trait]
impl SessionProvider for CognitoSessionProvider {
    async fn session(&self) -> Result<Session, LoginRequired> {
        let Some(tokens) = &self.tokens else {
            debug!("No session tokens presented");
            return Err(self.login_required());
        };

        match validate_id_token(&tokens.id_token, &self.config) {
            Ok(claims) => Ok(Session {
                bearer_token: tokens.access_token.clone(),
                role: claims.role(),
                subject: claims.sub,
            }),
            Err(e) => {
                debug!("Session rejected: {}", e);
                Err(self.login_required())
            }
        }
    }

    async fn sign_out(&self) -> SignOut {
        let revoked = match &self.tokens {
            Some(tokens) => match self.identity.global_sign_out(&tokens.access_token).await {
                Ok(()) => {
                    info!("Session revoked at identity provider");
                    true
                }
                Err(e) => {
                    warn!("Global sign-out failed, clearing local session only: {}", e);
                    false
                }
            },
            None => false,
        };

        SignOut {
            redirect_to: self.config.login_url.clone(),
            revoked,
        }
    }
}
