// libs/appointment-cell/src/form.rs
use std::collections::BTreeMap;
use std::mem;

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, error, warn};

use feedback_cell::{BannerKind, Feedback, PageEffect, Toggle, ACTION_RESULT_LIFETIME};
use shared_backend::ResourceError;
use shared_utils::generation::{RequestGeneration, Ticket};
use shared_utils::timezone::{form_input_to_wire, to_form_input, ParseTimeError};
use table_cell::TableError;

use crate::models::{
    picker_value, split_picker_value, AppointmentDetail, AppointmentPayload, EditTarget, PatientOption, PROVIDER,
};

/// Skeleton container of the edit form.
pub const FORM_CONTAINER: &str = "appointmentModal";
/// Save button carrying the inline loader.
pub const SAVE_BUTTON: &str = "button-primary";

pub const LOAD_FAILED: &str = "Error Loading Appointment";
pub const SAVE_FAILED: &str = "Error Saving Appointment";
pub const CREATED: &str = "Appointment created successfully";
pub const UPDATED: &str = "Appointment Updated successfully";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Patient,
    StartTime,
    EndTime,
    Location,
    Status,
}

impl Field {
    /// Form control name.
    pub fn name(&self) -> &'static str {
        match self {
            Field::Patient => "patient_name",
            Field::StartTime => "start_time",
            Field::EndTime => "end_time",
            Field::Location => "location",
            Field::Status => "status",
        }
    }

    pub fn required_message(&self) -> &'static str {
        match self {
            Field::Patient => "Please select a Patient",
            Field::StartTime => "Please enter Start Time",
            Field::EndTime => "Please enter End Time",
            Field::Location => "Please enter Location",
            Field::Status => "Please select a Status",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Field::Patient => "Patient",
            Field::StartTime => "Start Time",
            Field::EndTime => "End Time",
            Field::Location => "Location",
            Field::Status => "Status",
        }
    }
}

pub type FieldErrors = BTreeMap<Field, String>;

/// Raw form values. Times are `datetime-local` strings in the display zone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FormFields {
    #[serde(default, rename = "patient_name")]
    pub patient: String,
    #[serde(default)]
    pub start_time: String,
    #[serde(default)]
    pub end_time: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub status: String,
}

impl FormFields {
    pub fn from_detail(detail: &AppointmentDetail) -> Self {
        Self {
            patient: picker_value(&detail.patient_name, &detail.patient_id),
            start_time: to_form_input(detail.start_time),
            end_time: to_form_input(detail.end_time),
            location: detail.location.clone(),
            status: detail.status.clone(),
        }
    }

    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Patient => &self.patient,
            Field::StartTime => &self.start_time,
            Field::EndTime => &self.end_time,
            Field::Location => &self.location,
            Field::Status => &self.status,
        }
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        match field {
            Field::Patient => self.patient = value,
            Field::StartTime => self.start_time = value,
            Field::EndTime => self.end_time = value,
            Field::Location => self.location = value,
            Field::Status => self.status = value,
        }
    }

    /// Checks every field and builds the wire payload for `target`.
    pub fn validate(&self, target: &EditTarget) -> Result<AppointmentPayload, FieldErrors> {
        let mut errors = FieldErrors::new();

        for field in [Field::Patient, Field::StartTime, Field::EndTime, Field::Location, Field::Status] {
            if self.get(field).trim().is_empty() {
                errors.insert(field, field.required_message().to_string());
            }
        }

        let patient = split_picker_value(&self.patient);
        if patient.is_none() && !errors.contains_key(&Field::Patient) {
            errors.insert(Field::Patient, Field::Patient.required_message().to_string());
        }

        let start_time = wire_time(Field::StartTime, &self.start_time, &mut errors);
        let end_time = wire_time(Field::EndTime, &self.end_time, &mut errors);

        match (patient, start_time, end_time) {
            (Some((name, id)), Some(start_time), Some(end_time)) if errors.is_empty() => Ok(AppointmentPayload {
                id: target.id().map(str::to_string),
                patient_id: id.to_string(),
                patient_name: name.to_string(),
                start_time,
                end_time,
                location: self.location.trim().to_string(),
                status: self.status.clone(),
                provider: PROVIDER,
            }),
            _ => Err(errors),
        }
    }
}

fn wire_time(field: Field, value: &str, errors: &mut FieldErrors) -> Option<String> {
    match form_input_to_wire(value) {
        Ok(wire) => Some(wire),
        Err(ParseTimeError::Empty) => None,
        Err(ParseTimeError::Format(_)) => {
            errors.insert(field, format!("Please enter a valid {}", field.label()));
            None
        }
        Err(ParseTimeError::Nonexistent(_)) => {
            errors.insert(field, format!("{} does not exist in Central Time", field.label()));
            None
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum FormError {
    #[error("a request is already in flight")]
    InFlight,

    #[error("form is not open")]
    NotOpen,

    #[error("form is still loading")]
    Loading,

    #[error("completion belongs to a form that was closed or reopened")]
    Stale,

    #[error("{} field(s) failed validation", .0.len())]
    Invalid(FieldErrors),

    #[error(transparent)]
    Table(#[from] TableError),
}

/// What the form's load fetched: the patient options and, for edits, the
/// record being edited.
#[derive(Debug, Clone)]
pub struct LoadedForm {
    pub patients: Vec<PatientOption>,
    pub record: Option<AppointmentDetail>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FormState {
    Closed,
    Loading {
        ticket: Ticket,
        target: EditTarget,
    },
    Populated {
        target: EditTarget,
        patients: Vec<PatientOption>,
        fields: FormFields,
        errors: FieldErrors,
    },
    Submitting {
        ticket: Ticket,
        target: EditTarget,
        patients: Vec<PatientOption>,
        fields: FormFields,
    },
}

/// A validated submission waiting to be sent.
#[derive(Debug, Clone)]
pub struct Submission {
    pub ticket: Ticket,
    pub target: EditTarget,
    pub payload: AppointmentPayload,
}

/// Create/edit form for one appointment.
///
/// Transitions that start a request return a [`Ticket`]; the matching
/// `finish_*` call applies the result only while that ticket is current, so
/// completions for a form that has since been closed or reopened are dropped.
#[derive(Debug)]
pub struct AppointmentForm {
    state: FormState,
    requests: RequestGeneration,
}

impl Default for AppointmentForm {
    fn default() -> Self {
        Self::new()
    }
}

impl AppointmentForm {
    pub fn new() -> Self {
        Self {
            state: FormState::Closed,
            requests: RequestGeneration::new(),
        }
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn is_open(&self) -> bool {
        !matches!(self.state, FormState::Closed)
    }

    pub fn target(&self) -> Option<&EditTarget> {
        match &self.state {
            FormState::Closed => None,
            FormState::Loading { target, .. }
            | FormState::Populated { target, .. }
            | FormState::Submitting { target, .. } => Some(target),
        }
    }

    pub fn fields(&self) -> Option<&FormFields> {
        match &self.state {
            FormState::Populated { fields, .. } | FormState::Submitting { fields, .. } => Some(fields),
            _ => None,
        }
    }

    pub fn patients(&self) -> &[PatientOption] {
        match &self.state {
            FormState::Populated { patients, .. } | FormState::Submitting { patients, .. } => patients,
            _ => &[],
        }
    }

    pub fn errors(&self) -> Option<&FieldErrors> {
        match &self.state {
            FormState::Populated { errors, .. } => Some(errors),
            _ => None,
        }
    }

    /// The save control only accepts input while the form is populated.
    pub fn submit_enabled(&self) -> bool {
        matches!(self.state, FormState::Populated { .. })
    }

    pub fn open_create(&mut self, feedback: &mut Feedback) -> Result<Ticket, FormError> {
        self.open(EditTarget::Create, feedback)
    }

    pub fn open_edit(&mut self, id: impl Into<String>, feedback: &mut Feedback) -> Result<Ticket, FormError> {
        self.open(EditTarget::Update(id.into()), feedback)
    }

    fn open(&mut self, target: EditTarget, feedback: &mut Feedback) -> Result<Ticket, FormError> {
        if matches!(self.state, FormState::Submitting { .. }) {
            return Err(FormError::InFlight);
        }

        let ticket = self.requests.begin();
        debug!("Opening form for {}", target);
        feedback.toggle_skeleton(FORM_CONTAINER, Toggle::On);
        self.state = FormState::Loading { ticket, target };
        Ok(ticket)
    }

    pub fn finish_load(
        &mut self,
        ticket: Ticket,
        result: Result<LoadedForm, ResourceError>,
        feedback: &mut Feedback,
    ) -> Result<(), FormError> {
        let target = match &self.state {
            FormState::Loading { ticket: pending, target } if *pending == ticket && self.requests.is_current(ticket) => {
                target.clone()
            }
            _ => {
                warn!("Discarding stale form load (ticket {})", ticket.generation());
                return Err(FormError::Stale);
            }
        };

        feedback.toggle_skeleton(FORM_CONTAINER, Toggle::Off);

        match result {
            Ok(loaded) => {
                let fields = loaded.record.as_ref().map(FormFields::from_detail).unwrap_or_default();
                self.state = FormState::Populated {
                    target,
                    patients: loaded.patients,
                    fields,
                    errors: FieldErrors::new(),
                };
            }
            Err(e) => {
                error!("Failed to load {}: {}", target, e);
                feedback.action_result(LOAD_FAILED, BannerKind::Danger);
                self.requests.invalidate();
                self.state = FormState::Closed;
            }
        }

        Ok(())
    }

    /// Re-enters the populated state with values already entered in the
    /// browser, e.g. from a posted form.
    pub fn resume(
        &mut self,
        target: EditTarget,
        fields: FormFields,
        patients: Vec<PatientOption>,
    ) -> Result<(), FormError> {
        if matches!(self.state, FormState::Submitting { .. }) {
            return Err(FormError::InFlight);
        }

        self.requests.invalidate();
        self.state = FormState::Populated {
            target,
            patients,
            fields,
            errors: FieldErrors::new(),
        };
        Ok(())
    }

    pub fn set_field(&mut self, field: Field, value: impl Into<String>) -> Result<(), FormError> {
        match &mut self.state {
            FormState::Populated { fields, errors, .. } => {
                fields.set(field, value);
                errors.remove(&field);
                Ok(())
            }
            FormState::Submitting { .. } => Err(FormError::InFlight),
            FormState::Loading { .. } => Err(FormError::Loading),
            FormState::Closed => Err(FormError::NotOpen),
        }
    }

    /// Validates and, when valid, moves to submitting. Invalid input keeps
    /// the form populated with per-field messages and sends nothing.
    pub fn submit(&mut self, feedback: &mut Feedback) -> Result<Submission, FormError> {
        let payload = match &mut self.state {
            FormState::Populated { target, fields, errors, .. } => match fields.validate(target) {
                Ok(payload) => {
                    errors.clear();
                    payload
                }
                Err(invalid) => {
                    debug!("Form rejected: {} invalid field(s)", invalid.len());
                    *errors = invalid.clone();
                    return Err(FormError::Invalid(invalid));
                }
            },
            FormState::Submitting { .. } => return Err(FormError::InFlight),
            FormState::Loading { .. } => return Err(FormError::Loading),
            FormState::Closed => return Err(FormError::NotOpen),
        };

        let FormState::Populated { target, patients, fields, .. } = mem::replace(&mut self.state, FormState::Closed)
        else {
            return Err(FormError::NotOpen);
        };

        let ticket = self.requests.begin();
        feedback.toggle_spinner(SAVE_BUTTON, Toggle::On);

        self.state = FormState::Submitting {
            ticket,
            target: target.clone(),
            patients,
            fields,
        };

        Ok(Submission { ticket, target, payload })
    }

    /// Applies the outcome of a save. Success reloads the page after the
    /// result banner; failure closes the form without reloading.
    pub fn finish_submit(
        &mut self,
        ticket: Ticket,
        result: Result<(), ResourceError>,
        feedback: &mut Feedback,
    ) -> Result<PageEffect, FormError> {
        let target = match &self.state {
            FormState::Submitting { ticket: pending, target, .. }
                if *pending == ticket && self.requests.is_current(ticket) =>
            {
                target.clone()
            }
            _ => {
                warn!("Discarding stale form submission (ticket {})", ticket.generation());
                return Err(FormError::Stale);
            }
        };

        feedback.toggle_spinner(SAVE_BUTTON, Toggle::Off);
        self.requests.invalidate();
        self.state = FormState::Closed;

        match result {
            Ok(()) => {
                let message = match target {
                    EditTarget::Create => CREATED,
                    EditTarget::Update(_) => UPDATED,
                };
                feedback.action_result(message, BannerKind::Success);
                Ok(PageEffect::Reload { after: ACTION_RESULT_LIFETIME })
            }
            Err(e) => {
                error!("Failed to save {}: {}", target, e);
                feedback.action_result(SAVE_FAILED, BannerKind::Danger);
                Ok(PageEffect::Stay)
            }
        }
    }

    /// Closes the form, clearing fields and validation markers. Any request
    /// still outstanding is discarded when it completes.
    pub fn close(&mut self, feedback: &mut Feedback) {
        self.requests.invalidate();
        feedback.toggle_skeleton(FORM_CONTAINER, Toggle::Off);
        feedback.toggle_spinner(SAVE_BUTTON, Toggle::Off);
        self.state = FormState::Closed;
    }
}
