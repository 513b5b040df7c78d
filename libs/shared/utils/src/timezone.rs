//! Instants are shown to staff in one fixed zone regardless of where the
//! viewer is, and are sent to the backend as UTC in the backend's own
//! timestamp layout.

use chrono::{DateTime, LocalResult, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use thiserror::Error;

pub const DISPLAY_ZONE: Tz = chrono_tz::America::Chicago;

/// Appended after the millisecond field. The backend expects microseconds
/// plus an explicit offset, so the wire value carries both.
pub const WIRE_SUFFIX: &str = "000+0000";

const WIRE_BODY_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f";
const BACKEND_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f%z";
const FORM_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";
const FORM_FORMAT_SHORT: &str = "%Y-%m-%dT%H:%M";
const LIST_FORMAT: &str = "%-m/%-d/%Y, %-I:%M:%S %p";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseTimeError {
    #[error("empty time value")]
    Empty,
    #[error("unrecognised time value: {0}")]
    Format(String),
    #[error("{0} does not exist in the display zone")]
    Nonexistent(String),
}

/// `2024-03-01T15:00:00.000` + `000+0000`.
pub fn to_wire(instant: DateTime<Utc>) -> String {
    format!("{}{}", instant.format(WIRE_BODY_FORMAT), WIRE_SUFFIX)
}

/// Parses an instant as the backend returns it.
pub fn parse_instant(value: &str) -> Result<DateTime<Utc>, ParseTimeError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ParseTimeError::Empty);
    }

    if let Ok(parsed) = DateTime::parse_from_str(value, BACKEND_FORMAT) {
        return Ok(parsed.with_timezone(&Utc));
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Ok(parsed.with_timezone(&Utc));
    }
    // Offset-less values are already UTC.
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| Utc.from_utc_datetime(&naive))
        .map_err(|_| ParseTimeError::Format(value.to_string()))
}

/// Value for a `datetime-local` form field, in the display zone.
pub fn to_form_input(instant: DateTime<Utc>) -> String {
    instant.with_timezone(&DISPLAY_ZONE).format(FORM_FORMAT).to_string()
}

/// Reads a `datetime-local` value (with or without seconds) as wall-clock
/// time in the display zone.
pub fn parse_form_input(value: &str) -> Result<NaiveDateTime, ParseTimeError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ParseTimeError::Empty);
    }

    NaiveDateTime::parse_from_str(value, FORM_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(value, FORM_FORMAT_SHORT))
        .map_err(|_| ParseTimeError::Format(value.to_string()))
}

/// Converts display-zone wall-clock time to UTC. Inside a DST fall-back
/// overlap the earlier instant wins; times skipped by spring-forward are
/// rejected.
pub fn display_to_utc(local: NaiveDateTime) -> Result<DateTime<Utc>, ParseTimeError> {
    match DISPLAY_ZONE.from_local_datetime(&local) {
        LocalResult::Single(zoned) => Ok(zoned.with_timezone(&Utc)),
        LocalResult::Ambiguous(earliest, _) => Ok(earliest.with_timezone(&Utc)),
        LocalResult::None => Err(ParseTimeError::Nonexistent(local.format(FORM_FORMAT).to_string())),
    }
}

pub fn form_input_to_wire(value: &str) -> Result<String, ParseTimeError> {
    let local = parse_form_input(value)?;
    display_to_utc(local).map(to_wire)
}

/// Table cell rendering, matching an `en-US` locale string.
pub fn to_list_display(instant: DateTime<Utc>) -> String {
    instant.with_timezone(&DISPLAY_ZONE).format(LIST_FORMAT).to_string()
}

pub fn epoch_to_list_display(seconds: i64) -> Option<String> {
    Utc.timestamp_opt(seconds, 0).single().map(to_list_display)
}
