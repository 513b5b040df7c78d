use axum::response::{IntoResponse, Redirect, Response};
use tracing::info;

use shared_models::auth::{LoginRequired, Role};

use crate::capabilities::{Capability, CapabilitySet};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Dashboard,
    Appointments,
    Settings,
}

impl Page {
    pub fn required(&self) -> Option<Capability> {
        match self {
            Page::Appointments => Some(Capability::ManageAppointments),
            Page::Dashboard | Page::Settings => None,
        }
    }
}

/// The role may not open the page; the browser is sent to the landing page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessDenied {
    pub redirect_to: String,
}

impl IntoResponse for AccessDenied {
    fn into_response(self) -> Response {
        Redirect::to(&self.redirect_to).into_response()
    }
}

/// Why a page load stopped before rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageExit {
    Login(LoginRequired),
    Denied(AccessDenied),
}

impl From<LoginRequired> for PageExit {
    fn from(login: LoginRequired) -> Self {
        PageExit::Login(login)
    }
}

impl From<AccessDenied> for PageExit {
    fn from(denied: AccessDenied) -> Self {
        PageExit::Denied(denied)
    }
}

impl IntoResponse for PageExit {
    fn into_response(self) -> Response {
        match self {
            PageExit::Login(login) => login.into_response(),
            PageExit::Denied(denied) => denied.into_response(),
        }
    }
}

/// Runs once per page load, after the session resolves and before any data
/// is requested.
pub fn guard_page(page: Page, role: &Role, landing_path: &str) -> Result<(), AccessDenied> {
    match page.required() {
        Some(capability) if !CapabilitySet::for_role(role).allows(capability) => {
            info!("Role {:?} may not open {:?}, redirecting to {}", role, page, landing_path);
            Err(AccessDenied { redirect_to: landing_path.to_string() })
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_appointments_page_admits_admins() {
        assert!(guard_page(Page::Appointments, &Role::AppointmentsAdmin, "/dashboard").is_ok());
        assert!(guard_page(Page::Appointments, &Role::UserManagementAdmin, "/dashboard").is_ok());
    }

    #[test]
    fn test_appointments_page_redirects_everyone_else() {
        for role in [Role::HIRTAOperationsStaff, Role::Other("HealthcareFacilityStaff".into())] {
            assert_matches!(
                guard_page(Page::Appointments, &role, "/dashboard"),
                Err(AccessDenied { redirect_to }) if redirect_to == "/dashboard"
            );
        }
    }

    #[test]
    fn test_dashboard_open_to_all_sessions() {
        assert!(guard_page(Page::Dashboard, &Role::Other(String::new()), "/dashboard").is_ok());
        assert!(guard_page(Page::Settings, &Role::HIRTAOperationsStaff, "/dashboard").is_ok());
    }
}
