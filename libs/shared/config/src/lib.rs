use std::env;
use tracing::warn;

const DEFAULT_LOGIN_URL: &str = "/";
const DEFAULT_LANDING_PATH: &str = "/dashboard";
const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:3000";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub backend_base_url: String,
    pub region: String,
    pub user_pool_id: String,
    pub client_id: String,
    pub identity_pool_id: String,
    pub maps_api_key: String,
    pub session_jwt_secret: String,
    pub identity_endpoint: String,
    pub login_url: String,
    pub landing_path: String,
    pub listen_addr: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let region = env::var("REGION")
            .unwrap_or_else(|_| {
                warn!("REGION not set, using empty value");
                String::new()
            });

        let config = Self {
            backend_base_url: env::var("BASE_URL")
                .unwrap_or_else(|_| {
                    warn!("BASE_URL not set, using empty value");
                    String::new()
                }),
            user_pool_id: env::var("POOL_ID")
                .unwrap_or_else(|_| {
                    warn!("POOL_ID not set, using empty value");
                    String::new()
                }),
            client_id: env::var("CLIENT_ID")
                .unwrap_or_else(|_| {
                    warn!("CLIENT_ID not set, using empty value");
                    String::new()
                }),
            identity_pool_id: env::var("IDENTITY_POOL_ID")
                .unwrap_or_else(|_| {
                    warn!("IDENTITY_POOL_ID not set, using empty value");
                    String::new()
                }),
            maps_api_key: env::var("GOOGLE_MAPS_KEY")
                .unwrap_or_else(|_| {
                    warn!("GOOGLE_MAPS_KEY not set, location autocomplete disabled");
                    String::new()
                }),
            session_jwt_secret: env::var("SESSION_JWT_SECRET")
                .unwrap_or_else(|_| {
                    warn!("SESSION_JWT_SECRET not set, using empty value");
                    String::new()
                }),
            identity_endpoint: env::var("IDENTITY_ENDPOINT")
                .unwrap_or_else(|_| Self::default_identity_endpoint(&region)),
            login_url: env::var("LOGIN_URL")
                .unwrap_or_else(|_| DEFAULT_LOGIN_URL.to_string()),
            landing_path: DEFAULT_LANDING_PATH.to_string(),
            listen_addr: env::var("DASHBOARD_ADDR")
                .unwrap_or_else(|_| DEFAULT_LISTEN_ADDR.to_string()),
            region,
        };

        if !config.is_configured() {
            warn!("Dashboard not fully configured - missing environment variables");
        }

        config
    }

    fn default_identity_endpoint(region: &str) -> String {
        if region.is_empty() {
            return String::new();
        }
        format!("https://cognito-idp.{}.amazonaws.com", region)
    }

    pub fn is_configured(&self) -> bool {
        !self.backend_base_url.is_empty()
            && !self.session_jwt_secret.is_empty()
            && self.is_identity_configured()
    }

    pub fn is_identity_configured(&self) -> bool {
        !self.region.is_empty()
            && !self.user_pool_id.is_empty()
            && !self.client_id.is_empty()
    }

    pub fn has_maps_key(&self) -> bool {
        !self.maps_api_key.is_empty()
    }

    /// Issuer string the identity provider stamps into its tokens.
    pub fn identity_issuer(&self) -> String {
        format!("cognito-idp.{}.amazonaws.com/{}", self.region, self.user_pool_id)
    }
}
