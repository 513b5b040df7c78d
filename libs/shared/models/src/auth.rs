use std::fmt;

use axum::response::{IntoResponse, Redirect, Response};
use serde::{Deserialize, Serialize};

/// Claims carried by the identity provider's id token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdTokenClaims {
    pub sub: String,
    pub exp: Option<u64>,
    pub iat: Option<u64>,
    pub iss: Option<String>,
    pub aud: Option<String>,
    pub email: Option<String>,
    #[serde(rename = "cognito:groups", default)]
    pub groups: Vec<String>,
}

impl IdTokenClaims {
    /// The role claim is the first group the user belongs to.
    pub fn role(&self) -> Role {
        self.groups
            .first()
            .map(|group| Role::from(group.as_str()))
            .unwrap_or_else(|| Role::Other(String::new()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Role {
    AppointmentsAdmin,
    UserManagementAdmin,
    HIRTAOperationsStaff,
    Other(String),
}

impl From<&str> for Role {
    fn from(value: &str) -> Self {
        match value {
            "AppointmentsAdmin" => Role::AppointmentsAdmin,
            "UserManagementAdmin" => Role::UserManagementAdmin,
            "HIRTAOperationsStaff" => Role::HIRTAOperationsStaff,
            other => Role::Other(other.to_string()),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::AppointmentsAdmin => write!(f, "AppointmentsAdmin"),
            Role::UserManagementAdmin => write!(f, "UserManagementAdmin"),
            Role::HIRTAOperationsStaff => write!(f, "HIRTAOperationsStaff"),
            Role::Other(name) => write!(f, "{}", name),
        }
    }
}

/// An authenticated session as seen by the pages: the bearer token sent to
/// the backend and the role claim used for gating.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub bearer_token: String,
    pub role: Role,
    pub subject: String,
}

/// Returned whenever no valid session exists. The only meaning is
/// "navigate to the login page".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginRequired {
    pub login_url: String,
}

impl LoginRequired {
    pub fn new(login_url: impl Into<String>) -> Self {
        Self { login_url: login_url.into() }
    }
}

impl IntoResponse for LoginRequired {
    fn into_response(self) -> Response {
        Redirect::to(&self.login_url).into_response()
    }
}
