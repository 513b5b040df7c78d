use reqwest::{Method, StatusCode};

/// The fixed set of REST resources the dashboard talks to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiResource {
    Patients,
    Appointments,
    Appointment(String),
    Dashboard,
    Settings,
    Setting(String),
}

impl ApiResource {
    pub fn path(&self) -> String {
        match self {
            ApiResource::Patients => "/api/patients/".to_string(),
            ApiResource::Appointments => "/api/appointments/".to_string(),
            ApiResource::Appointment(id) => format!("/api/appointments/{}", urlencode(id)),
            ApiResource::Dashboard => "/api/dashboard/".to_string(),
            ApiResource::Settings => "/api/settings/".to_string(),
            ApiResource::Setting(name) => format!("/api/settings/{}", urlencode(name)),
        }
    }
}

fn urlencode(segment: &str) -> String {
    urlencoding::encode(segment).into_owned()
}

/// The one status each method counts as success; anything else failed.
pub fn expected_status(method: &Method) -> StatusCode {
    if *method == Method::DELETE {
        StatusCode::NO_CONTENT
    } else {
        StatusCode::OK
    }
}
