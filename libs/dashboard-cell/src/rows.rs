use feedback_cell::render::escape;
use navigation_cell::{Capability, CapabilitySet};
use shared_utils::timezone::{epoch_to_list_display, parse_instant, to_list_display};
use table_cell::{Cell, ColumnDescriptor, TableRow};

use crate::models::{DashboardRecord, Eta, Ride, Stop, TBD};

pub const NOT_REQUESTED: &str = "Not Requested";
pub const NOT_AVAILABLE: &str = "N/A";

/// Ride columns shown only to roles allowed to see ride details.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RideDetails {
    pub pick_up_note: String,
    pub pickup_spot: String,
    pub drop_off_spot: String,
    pub drop_off_note: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardRow {
    pub customer: String,
    pub appointment_time: String,
    pub appointment_location: String,
    pub appointment_status: String,
    pub trip_status: String,
    pub pickup_time: String,
    pub drop_off_time: String,
    pub driver_vehicle_info: String,
    pub ride_details: Option<RideDetails>,
}

impl DashboardRow {
    pub fn assemble(record: &DashboardRecord, capabilities: &CapabilitySet) -> Self {
        let ride = &record.ride;

        let ride_details = capabilities.allows(Capability::ViewRideDetails).then(|| RideDetails {
            pick_up_note: stop_value(ride.pickup.as_ref(), |s| s.notes.as_deref()),
            pickup_spot: stop_value(ride.pickup.as_ref(), |s| s.address.as_deref()),
            drop_off_spot: stop_value(ride.dropoff.as_ref(), |s| s.address.as_deref()),
            drop_off_note: stop_value(ride.dropoff.as_ref(), |s| s.notes.as_deref()),
        });

        Self {
            customer: record.patient_name.clone(),
            appointment_time: appointment_time(&record.start_time),
            appointment_location: record.location.clone(),
            appointment_status: record.status.clone(),
            trip_status: ride.trip_status.clone(),
            pickup_time: eta(&ride.pickup_eta),
            drop_off_time: eta(&ride.dropoff_eta),
            driver_vehicle_info: driver_vehicle(ride),
            ride_details,
        }
    }

    pub fn is_not_requested(&self) -> bool {
        self.trip_status == NOT_REQUESTED
    }

    pub fn trip_status_html(&self) -> String {
        let class = if self.is_not_requested() { "lozenge-danger" } else { "lozenge-success" };
        format!("<span class='{}'>{}</span>", class, escape(&self.trip_status))
    }

    pub fn to_table_row(&self, id: String) -> TableRow {
        let mut cells = vec![
            Cell::text(self.customer.clone()),
            Cell::text(self.appointment_time.clone()),
            Cell::text(self.appointment_location.clone()),
            Cell::text(self.appointment_status.clone()),
            Cell::html(self.trip_status.clone(), self.trip_status_html()),
            Cell::text(self.pickup_time.clone()),
            Cell::text(self.drop_off_time.clone()),
            Cell::text(self.driver_vehicle_info.clone()),
        ];
        if let Some(details) = &self.ride_details {
            cells.extend([
                Cell::text(details.pick_up_note.clone()),
                Cell::text(details.pickup_spot.clone()),
                Cell::text(details.drop_off_spot.clone()),
                Cell::text(details.drop_off_note.clone()),
            ]);
        }
        TableRow::new(id, cells)
    }
}

pub fn dashboard_columns(capabilities: &CapabilitySet) -> Vec<ColumnDescriptor> {
    let mut columns = vec![
        ColumnDescriptor::new("customer", "Customer"),
        ColumnDescriptor::new("appointment_time", "Appointment Time"),
        ColumnDescriptor::new("appointment_location", "Appointment Location"),
        ColumnDescriptor::new("appointment_status", "Appointment Status"),
        ColumnDescriptor::new("trip_status", "Trip Status"),
        ColumnDescriptor::new("pickup_time", "Pickup Time"),
        ColumnDescriptor::new("drop_off_time", "Drop Off Time"),
        ColumnDescriptor::new("driver_vehicle_info", "Driver/Vehicle"),
    ];
    if capabilities.allows(Capability::ViewRideDetails) {
        columns.extend([
            ColumnDescriptor::new("pick_up_note", "Pick Up Note"),
            ColumnDescriptor::new("pickup_spot", "Pick Up Spot"),
            ColumnDescriptor::new("drop_off_spot", "Drop Off Spot"),
            ColumnDescriptor::new("drop_off_note", "Drop Off Note"),
        ]);
    }
    columns
}

/// Row highlight keyed on the trip status column.
pub fn row_class(row: &TableRow) -> Option<String> {
    let trip_status = row.cells.get(4).map(|cell| cell.text.as_str());
    Some(if trip_status == Some(NOT_REQUESTED) { "bg-danger-light" } else { "bg-success-light" }.to_string())
}

fn appointment_time(raw: &str) -> String {
    if raw == TBD {
        return TBD.to_string();
    }
    parse_instant(raw).map(to_list_display).unwrap_or_else(|_| raw.to_string())
}

fn eta(value: &Eta) -> String {
    match value {
        Eta::Epoch(seconds) => {
            epoch_to_list_display(*seconds as i64).unwrap_or_else(|| NOT_AVAILABLE.to_string())
        }
        Eta::Text(text) if text == TBD => NOT_AVAILABLE.to_string(),
        Eta::Text(text) => text
            .trim()
            .parse::<f64>()
            .ok()
            .and_then(|seconds| epoch_to_list_display(seconds as i64))
            .unwrap_or_else(|| text.clone()),
    }
}

fn driver_vehicle(ride: &Ride) -> String {
    let driver = ride
        .driver_info
        .as_ref()
        .map(|d| format!("{} {}", d.first_name, d.last_name).trim().to_string())
        .unwrap_or_default();
    let plate = ride
        .vehicle_info
        .as_ref()
        .map(|v| v.license_plate.trim().to_string())
        .unwrap_or_default();

    if driver.is_empty() && plate.is_empty() {
        TBD.to_string()
    } else {
        format!("{}/{}", driver, plate)
    }
}

fn stop_value(stop: Option<&Stop>, pick: impl Fn(&Stop) -> Option<&str>) -> String {
    stop.and_then(pick).map(str::to_string).unwrap_or_else(|| NOT_AVAILABLE.to_string())
}
