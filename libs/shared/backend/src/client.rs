use reqwest::{
    Client,
    header::{HeaderMap, HeaderValue, CONTENT_TYPE, AUTHORIZATION},
    Method, StatusCode,
};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, error};

use shared_config::AppConfig;

use crate::resource::{expected_status, ApiResource};

/// Every failure looks the same to callers: the request did not succeed.
/// The variants only exist for logging.
#[derive(Debug, Error)]
pub enum ResourceError {
    #[error("request failed with status {0}")]
    Status(StatusCode),

    #[error("request could not be sent: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("response body is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("bearer token cannot be used as a header value")]
    InvalidToken,
}

/// Authenticated JSON client for the dashboard backend.
///
/// Built without a timeout and never retries: a request that hangs keeps
/// its caller waiting.
#[derive(Debug, Clone)]
pub struct ResourceClient {
    client: Client,
    base_url: String,
}

impl ResourceClient {
    pub fn new(config: &AppConfig) -> Self {
        Self::with_base_url(&config.backend_base_url)
    }

    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn get_headers(&self, token: &str, has_body: bool) -> Result<HeaderMap, ResourceError> {
        let mut headers = HeaderMap::new();

        // The backend authorizer takes the raw token, no scheme prefix.
        let auth = HeaderValue::from_str(token).map_err(|_| ResourceError::InvalidToken)?;
        headers.insert(AUTHORIZATION, auth);

        if has_body {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }

        Ok(headers)
    }

    pub async fn request(
        &self,
        method: Method,
        resource: &ApiResource,
        token: &str,
        body: Option<Value>,
    ) -> Result<Value, ResourceError> {
        let url = format!("{}{}", self.base_url, resource.path());
        debug!("{} {}", method, url);

        let headers = self.get_headers(token, body.is_some())?;
        let expected = expected_status(&method);

        let mut req = self.client.request(method.clone(), &url).headers(headers);
        if let Some(body_data) = body {
            req = req.body(serde_json::to_vec(&body_data)?);
        }

        let response = req.send().await.map_err(|e| {
            error!("{} {} failed to send: {}", method, url, e);
            ResourceError::Transport(e)
        })?;

        let status = response.status();
        if status != expected {
            error!("{} {} returned {} (expected {})", method, url, status, expected);
            return Err(ResourceError::Status(status));
        }

        let text = response.text().await?;
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }

        Ok(serde_json::from_str(&text)?)
    }

    pub async fn get<T>(&self, resource: &ApiResource, token: &str) -> Result<T, ResourceError>
    where
        T: DeserializeOwned,
    {
        let value = self.request(Method::GET, resource, token, None).await?;
        Ok(serde_json::from_value(value)?)
    }

    pub async fn post<B>(&self, resource: &ApiResource, token: &str, body: &B) -> Result<Value, ResourceError>
    where
        B: Serialize,
    {
        let body = serde_json::to_value(body)?;
        self.request(Method::POST, resource, token, Some(body)).await
    }

    pub async fn put<B>(&self, resource: &ApiResource, token: &str, body: &B) -> Result<Value, ResourceError>
    where
        B: Serialize,
    {
        let body = serde_json::to_value(body)?;
        self.request(Method::PUT, resource, token, Some(body)).await
    }

    pub async fn delete(&self, resource: &ApiResource, token: &str) -> Result<(), ResourceError> {
        self.request(Method::DELETE, resource, token, None).await.map(|_| ())
    }
}
