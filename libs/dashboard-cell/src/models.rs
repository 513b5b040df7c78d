use serde::{Deserialize, Deserializer};

/// Placeholder the backend uses for values it does not know yet.
pub const TBD: &str = "TBD";

/// One row of `GET /api/dashboard/`.
///
/// Any field may be missing or `null`; both read as the placeholder default.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DashboardRecord {
    #[serde(default, deserialize_with = "optional_id")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub patient_name: String,
    /// An instant, or `TBD`.
    #[serde(default = "tbd", deserialize_with = "null_as_tbd")]
    pub start_time: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub location: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub ride: Ride,
}

/// The ride booked for an appointment. Every part may be missing.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Ride {
    #[serde(default, deserialize_with = "null_as_default")]
    pub trip_status: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub pickup_eta: Eta,
    #[serde(default, deserialize_with = "null_as_default")]
    pub dropoff_eta: Eta,
    #[serde(default)]
    pub driver_info: Option<DriverInfo>,
    #[serde(default)]
    pub vehicle_info: Option<VehicleInfo>,
    #[serde(default)]
    pub pickup: Option<Stop>,
    #[serde(default)]
    pub dropoff: Option<Stop>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Eta {
    /// Epoch seconds.
    Epoch(f64),
    Text(String),
}

impl Default for Eta {
    fn default() -> Self {
        Eta::Text(TBD.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct DriverInfo {
    #[serde(default, deserialize_with = "null_as_default")]
    pub first_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub last_name: String,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct VehicleInfo {
    #[serde(default, deserialize_with = "null_as_default")]
    pub license_plate: String,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Stop {
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

fn tbd() -> String {
    TBD.to_string()
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn null_as_tbd<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_else(tbd))
}

fn optional_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<serde_json::Value>::deserialize(deserializer)? {
        Some(serde_json::Value::String(text)) => Some(text),
        Some(serde_json::Value::Number(number)) => Some(number.to_string()),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_sparse_ride_deserializes() {
        let record: DashboardRecord = serde_json::from_value(json!({
            "patient_name": "J. Doe",
            "start_time": "TBD",
            "ride": { "trip_status": "Not Requested", "pickup_eta": "TBD" }
        }))
        .unwrap();

        assert_eq!(record.id, None);
        assert_eq!(record.ride.pickup_eta, Eta::Text("TBD".into()));
        assert_eq!(record.ride.dropoff_eta, Eta::Text("TBD".into()));
        assert!(record.ride.driver_info.is_none());
        assert!(record.ride.pickup.is_none());
    }

    fn with_ride(ride: serde_json::Value) -> DashboardRecord {
        serde_json::from_value(json!({ "patient_name": "J. Doe", "start_time": "TBD", "ride": ride })).unwrap()
    }

    #[test]
    fn test_null_ride_reads_as_empty() {
        let record = with_ride(serde_json::Value::Null);
        assert_eq!(record.ride, Ride::default());
    }

    #[test]
    fn test_null_driver_names_read_as_blank() {
        let record = with_ride(json!({ "driver_info": { "first_name": "Sam", "last_name": null } }));
        assert_eq!(
            record.ride.driver_info,
            Some(DriverInfo { first_name: "Sam".into(), last_name: String::new() })
        );

        let record = with_ride(json!({ "driver_info": { "first_name": null, "last_name": null } }));
        assert_eq!(record.ride.driver_info, Some(DriverInfo::default()));
    }

    #[test]
    fn test_null_license_plate_reads_as_blank() {
        let record = with_ride(json!({ "vehicle_info": { "license_plate": null } }));
        assert_eq!(record.ride.vehicle_info, Some(VehicleInfo::default()));
    }

    #[test]
    fn test_null_etas_read_as_tbd() {
        let record = with_ride(json!({ "pickup_eta": null, "dropoff_eta": null }));
        assert_eq!(record.ride.pickup_eta, Eta::Text(TBD.into()));
        assert_eq!(record.ride.dropoff_eta, Eta::Text(TBD.into()));
    }

    #[test]
    fn test_null_record_fields_read_as_placeholders() {
        let record: DashboardRecord = serde_json::from_value(json!({
            "id": null,
            "patient_name": null,
            "start_time": null,
            "location": null,
            "status": null,
            "ride": { "trip_status": null, "pickup": null, "driver_info": null }
        }))
        .unwrap();

        assert_eq!(record.start_time, TBD);
        assert_eq!(record.patient_name, "");
        assert_eq!(record.ride.trip_status, "");
        assert!(record.ride.pickup.is_none());
    }

    #[test]
    fn test_numeric_eta() {
        let ride: Ride = serde_json::from_value(json!({ "pickup_eta": 1709302500 })).unwrap();
        assert_eq!(ride.pickup_eta, Eta::Epoch(1709302500.0));
    }
}
