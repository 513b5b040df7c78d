use shared_models::auth::Role;

use crate::capabilities::{Capability, CapabilitySet};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavEntry {
    Dashboard,
    Appointments,
    Patients,
    UserManagement,
}

impl NavEntry {
    pub const ALL: [NavEntry; 4] = [
        NavEntry::Dashboard,
        NavEntry::Appointments,
        NavEntry::Patients,
        NavEntry::UserManagement,
    ];

    pub fn element_id(&self) -> &'static str {
        match self {
            NavEntry::Dashboard => "dashboard-nav",
            NavEntry::Appointments => "appointments-nav",
            NavEntry::Patients => "patients-nav",
            NavEntry::UserManagement => "user-management-nav",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            NavEntry::Dashboard => "Dashboard",
            NavEntry::Appointments => "Appointments",
            NavEntry::Patients => "Patients",
            NavEntry::UserManagement => "User Management",
        }
    }

    pub fn href(&self) -> &'static str {
        match self {
            NavEntry::Dashboard => "/dashboard",
            NavEntry::Appointments => "/appointments",
            NavEntry::Patients => "/patients",
            NavEntry::UserManagement => "/users",
        }
    }

    fn required(&self) -> Option<Capability> {
        match self {
            NavEntry::Dashboard => None,
            NavEntry::Appointments => Some(Capability::AppointmentsNav),
            NavEntry::Patients => Some(Capability::PatientsNav),
            NavEntry::UserManagement => Some(Capability::UserManagementNav),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavItem {
    pub entry: NavEntry,
    pub visible: bool,
}

/// Visibility of every navigation entry for `role`. Hidden entries are
/// still rendered (as invisible) so the layout does not shift.
pub fn apply_role_visibility(role: &Role) -> Vec<NavItem> {
    let capabilities = CapabilitySet::for_role(role);

    NavEntry::ALL
        .iter()
        .map(|entry| NavItem {
            entry: *entry,
            visible: entry.required().map_or(true, |cap| capabilities.allows(cap)),
        })
        .collect()
}
