// libs/appointment-cell/src/models.rs
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use shared_utils::timezone::parse_instant;

/// Provider tag the backend expects on every appointment written from the
/// dashboard.
pub const PROVIDER: &str = "epic";

/// Status choices offered by the form. The backend owns the vocabulary, so
/// a record carrying any other status keeps it.
pub const STATUS_OPTIONS: [&str; 4] = ["Scheduled", "Confirmed", "Completed", "Cancelled"];

// ==============================================================================
// BACKEND RECORDS
// ==============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AppointmentSummary {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    pub patient_name: String,
    #[serde(deserialize_with = "instant")]
    pub start_time: DateTime<Utc>,
    #[serde(deserialize_with = "instant")]
    pub end_time: DateTime<Utc>,
    pub location: String,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AppointmentDetail {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    #[serde(deserialize_with = "id_string")]
    pub patient_id: String,
    pub patient_name: String,
    #[serde(deserialize_with = "instant")]
    pub start_time: DateTime<Utc>,
    #[serde(deserialize_with = "instant")]
    pub end_time: DateTime<Utc>,
    pub location: String,
    pub status: String,
    #[serde(default)]
    pub provider: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PatientOption {
    #[serde(deserialize_with = "id_string")]
    pub patient_id: String,
    pub name: String,
}

impl PatientOption {
    /// Picker option value, `"<name>-<patient_id>"`.
    pub fn value(&self) -> String {
        picker_value(&self.name, &self.patient_id)
    }

    pub fn label(&self) -> String {
        format!("{} ({})", self.name, self.patient_id)
    }
}

pub fn picker_value(name: &str, patient_id: &str) -> String {
    format!("{}-{}", name, patient_id)
}

/// Splits a picker value back into name and id. The id is everything after
/// the last hyphen, so hyphenated names survive.
pub fn split_picker_value(value: &str) -> Option<(&str, &str)> {
    let (name, id) = value.rsplit_once('-')?;
    if name.trim().is_empty() || id.trim().is_empty() {
        return None;
    }
    Some((name, id))
}

// ==============================================================================
// WRITE PAYLOAD
// ==============================================================================

/// Body of `POST /api/appointments/` and `PUT /api/appointments/{id}`.
/// Times are already in wire form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppointmentPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub patient_id: String,
    pub patient_name: String,
    pub start_time: String,
    pub end_time: String,
    pub location: String,
    pub status: String,
    pub provider: &'static str,
}

/// Which record a form submission writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditTarget {
    Create,
    Update(String),
}

impl EditTarget {
    pub fn id(&self) -> Option<&str> {
        match self {
            EditTarget::Create => None,
            EditTarget::Update(id) => Some(id),
        }
    }
}

impl fmt::Display for EditTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditTarget::Create => write!(f, "new appointment"),
            EditTarget::Update(id) => write!(f, "appointment {}", id),
        }
    }
}

// ==============================================================================
// SERDE HELPERS
// ==============================================================================

fn instant<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_instant(&raw).map_err(serde::de::Error::custom)
}

/// Ids arrive as strings or numbers depending on the table they come from.
fn id_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(i64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(text) => text,
        RawId::Number(number) => number.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_detail_parses_backend_times_and_numeric_ids() {
        let detail: AppointmentDetail = serde_json::from_value(json!({
            "id": 7,
            "patient_id": 42,
            "patient_name": "J. Doe",
            "start_time": "2024-03-01T15:00:00.000000+0000",
            "end_time": "2024-03-01T15:30:00.000000+0000",
            "location": "Clinic A",
            "status": "Scheduled"
        }))
        .unwrap();

        assert_eq!(detail.id, "7");
        assert_eq!(detail.patient_id, "42");
        assert_eq!(detail.start_time, Utc.with_ymd_and_hms(2024, 3, 1, 15, 0, 0).unwrap());
        assert_eq!(detail.provider, None);
    }

    #[test]
    fn test_picker_value_round_trip_with_hyphenated_name() {
        let option = PatientOption { patient_id: "42".into(), name: "Mary-Jane Doe".into() };

        assert_eq!(option.value(), "Mary-Jane Doe-42");
        assert_eq!(option.label(), "Mary-Jane Doe (42)");
        assert_eq!(split_picker_value(&option.value()), Some(("Mary-Jane Doe", "42")));
        assert_eq!(split_picker_value("nobody"), None);
        assert_eq!(split_picker_value("J. Doe-"), None);
    }

    #[test]
    fn test_payload_omits_id_on_create() {
        let payload = AppointmentPayload {
            id: None,
            patient_id: "42".into(),
            patient_name: "J. Doe".into(),
            start_time: "2024-03-01T15:00:00.000000+0000".into(),
            end_time: "2024-03-01T15:30:00.000000+0000".into(),
            location: "Clinic A".into(),
            status: "Scheduled".into(),
            provider: PROVIDER,
        };

        let value = serde_json::to_value(&payload).unwrap();
        assert!(value.get("id").is_none());
        assert_eq!(value["provider"], "epic");
    }
}
