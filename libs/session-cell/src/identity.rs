use reqwest::{
    Client,
    header::{HeaderMap, HeaderValue, CONTENT_TYPE},
};
use serde_json::json;
use thiserror::Error;
use tracing::debug;

use shared_config::AppConfig;

const GLOBAL_SIGN_OUT_TARGET: &str = "AWSCognitoIdentityProviderService.GlobalSignOut";

#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("identity endpoint is not configured")]
    NotConfigured,
    #[error("identity provider returned status {0}")]
    Status(u16),
    #[error("identity provider unreachable: {0}")]
    Transport(#[from] reqwest::Error),
}

/// The few identity provider calls the dashboard makes itself.
#[derive(Debug, Clone)]
pub struct IdentityClient {
    client: Client,
    endpoint: String,
}

impl IdentityClient {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: Client::new(),
            endpoint: config.identity_endpoint.trim_end_matches('/').to_string(),
        }
    }

    /// Revokes every token issued for the user behind `access_token`.
    pub async fn global_sign_out(&self, access_token: &str) -> Result<(), IdentityError> {
        if self.endpoint.is_empty() {
            return Err(IdentityError::NotConfigured);
        }

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/x-amz-json-1.1"));
        headers.insert("X-Amz-Target", HeaderValue::from_static(GLOBAL_SIGN_OUT_TARGET));

        debug!("Global sign-out via {}", self.endpoint);
        let response = self.client
            .post(format!("{}/", self.endpoint))
            .headers(headers)
            .body(json!({ "AccessToken": access_token }).to_string())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(IdentityError::Status(status.as_u16()));
        }

        Ok(())
    }
}
