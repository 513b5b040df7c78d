use shared_models::auth::Role;

/// Everything a role can be allowed to see or do. Navigation, page guards,
/// table toolbars and dashboard columns all ask this one lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    AppointmentsNav,
    PatientsNav,
    UserManagementNav,
    ManageAppointments,
    ExportTables,
    ViewRideDetails,
}

const APPOINTMENTS_ADMIN: &[Capability] = &[
    Capability::AppointmentsNav,
    Capability::PatientsNav,
    Capability::ManageAppointments,
    Capability::ExportTables,
    Capability::ViewRideDetails,
];

const USER_MANAGEMENT_ADMIN: &[Capability] = &[
    Capability::AppointmentsNav,
    Capability::PatientsNav,
    Capability::UserManagementNav,
    Capability::ManageAppointments,
    Capability::ViewRideDetails,
];

const OPERATIONS_STAFF: &[Capability] = &[Capability::ViewRideDetails];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapabilitySet(&'static [Capability]);

impl CapabilitySet {
    pub fn for_role(role: &Role) -> Self {
        match role {
            Role::AppointmentsAdmin => CapabilitySet(APPOINTMENTS_ADMIN),
            Role::UserManagementAdmin => CapabilitySet(USER_MANAGEMENT_ADMIN),
            Role::HIRTAOperationsStaff => CapabilitySet(OPERATIONS_STAFF),
            Role::Other(_) => CapabilitySet(&[]),
        }
    }

    pub fn allows(&self, capability: Capability) -> bool {
        self.0.contains(&capability)
    }

    pub fn iter(&self) -> impl Iterator<Item = Capability> + '_ {
        self.0.iter().copied()
    }
}
