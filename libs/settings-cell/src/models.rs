use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

/// The settings the panel edits, in display order.
pub const SETTING_NAMES: [&str; 2] = ["prior_period", "subsequent_period"];

/// Smallest value either period may be saved with.
pub const MIN_PERIOD: i64 = 15;

/// Setting name to its value as entered.
pub type SettingValues = BTreeMap<String, String>;

/// One entry of `GET /api/settings/`, also the body of `POST /api/settings/{name}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Setting {
    pub name: String,
    #[serde(deserialize_with = "string_or_number")]
    pub value: String,
}

impl Setting {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

pub fn label(name: &str) -> &'static str {
    match name {
        "prior_period" => "Prior Period",
        "subsequent_period" => "Subsequent Period",
        _ => "Setting",
    }
}

/// Collects the known settings, blank for any the backend left out.
pub fn known_values(settings: &[Setting]) -> SettingValues {
    SETTING_NAMES
        .iter()
        .map(|name| {
            let value = settings
                .iter()
                .find(|s| s.name == *name)
                .map(|s| s.value.clone())
                .unwrap_or_default();
            (name.to_string(), value)
        })
        .collect()
}

/// Every period parses as an integer of at least [`MIN_PERIOD`].
pub fn values_valid(values: &SettingValues) -> bool {
    SETTING_NAMES.iter().all(|name| {
        values
            .get(*name)
            .and_then(|v| v.trim().parse::<i64>().ok())
            .is_some_and(|v| v >= MIN_PERIOD)
    })
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(text) => text,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    })
}
