//! HTML for the appointments page body.

use feedback_cell::render::{escape, inline_loader, load_error_state, skeleton_class};
use feedback_cell::Feedback;
use table_cell::{render_table, ActionKind, ActionRenderer, Draw, RowAction, TableRow, TableView};

use crate::form::{AppointmentForm, Field, FORM_CONTAINER, SAVE_BUTTON};
use crate::models::{EditTarget, STATUS_OPTIONS};

pub const TABLE_ID: &str = "mod_ehr";
pub const PAGE_PATH: &str = "/appointments";

/// Edit opens the form in place; delete posts straight to the delete route.
#[derive(Debug, Default, Clone, Copy)]
pub struct AppointmentActions;

impl ActionRenderer for AppointmentActions {
    fn actions(&self, row: &TableRow) -> Vec<RowAction> {
        vec![RowAction::edit(&row.id), RowAction::delete(&row.id)]
    }

    fn render(&self, action: &RowAction) -> String {
        let id = urlencoding::encode(&action.target_id);
        match action.kind {
            ActionKind::Edit => format!(
                r#"<a title="edit" class="editBtn btn flex-1" data-id="{}" href="{PAGE_PATH}?edit={}">Edit</a>"#,
                escape(&action.target_id),
                id,
            ),
            ActionKind::Delete => format!(
                r#"<form method="post" action="{PAGE_PATH}/{}/delete" class="d-inline"><button title="delete" type="submit" class="deleteBtn btn flex-1" data-id="{}">Delete</button></form>"#,
                id,
                escape(&action.target_id),
            ),
        }
    }
}

/// Google Maps places script for the location autocomplete, when a key is
/// configured.
pub fn maps_script(api_key: &str) -> String {
    if api_key.is_empty() {
        return String::new();
    }
    format!(
        r#"<script src="https://maps.googleapis.com/maps/api/js?key={}&libraries=places&callback=googleMapsAutoComplete" async defer></script>"#,
        escape(api_key)
    )
}

fn error_label(form: &AppointmentForm, field: Field) -> String {
    match form.errors().and_then(|errors| errors.get(&field)) {
        Some(message) => format!(
            r#"<label id="{}-error" class="error text-danger" for="{}">{}</label>"#,
            field.name(),
            field.name(),
            escape(message)
        ),
        None => String::new(),
    }
}

fn options(choices: impl Iterator<Item = (String, String)>, selected: &str, placeholder: &str) -> String {
    let mut html = format!(r#"<option value="">{}</option>"#, escape(placeholder));
    let mut found = selected.is_empty();
    for (value, label) in choices {
        let is_selected = value == selected;
        found |= is_selected;
        html.push_str(&format!(
            r#"<option value="{}"{}>{}</option>"#,
            escape(&value),
            if is_selected { " selected" } else { "" },
            escape(&label)
        ));
    }
    if !found {
        html.push_str(&format!(
            r#"<option value="{0}" selected>{0}</option>"#,
            escape(selected)
        ));
    }
    html
}

pub fn render_form(form: &AppointmentForm, feedback: &Feedback) -> String {
    if !form.is_open() {
        return String::new();
    }

    let fields = form.fields().cloned().unwrap_or_default();
    let skeleton = skeleton_class(feedback, FORM_CONTAINER);
    let id_input = match form.target() {
        Some(EditTarget::Update(id)) => format!(r#"<input type="hidden" name="id" value="{}" />"#, escape(id)),
        _ => String::new(),
    };
    let title = match form.target() {
        Some(EditTarget::Update(_)) => "Edit Appointment",
        _ => "Add Appointment",
    };

    let patients = options(
        form.patients().iter().map(|p| (p.value(), p.label())),
        &fields.patient,
        "Select a patient",
    );
    let statuses = options(
        STATUS_OPTIONS.iter().map(|s| (s.to_string(), s.to_string())),
        &fields.status,
        "Select a status",
    );

    format!(
        r##"<div id="{container}" class="modal" style="display: block;">
    <form id="appointmentForm" method="post" action="{PAGE_PATH}/save" novalidate>
        <h2>{title}</h2>
        {id_input}
        <div class="{skeleton}"><label for="patientName">Patient</label>
            <select id="patientName" name="patient_name">{patients}</select>{patient_error}</div>
        <div class="{skeleton}"><label for="startTime">Start Time</label>
            <input type="datetime-local" step="1" id="startTime" name="start_time" value="{start}" />{start_error}</div>
        <div class="{skeleton}"><label for="endTime">End Time</label>
            <input type="datetime-local" step="1" id="endTime" name="end_time" value="{end}" />{end_error}</div>
        <div class="{skeleton}"><label for="location">Location</label>
            <input type="text" id="location" name="location" value="{location}" autocomplete="off" />{location_error}</div>
        <div class="{skeleton}"><label for="status">Status</label>
            <select id="status" name="status">{statuses}</select>{status_error}</div>
        <div class="d-flex">
            <a class="close button-secondary" href="{PAGE_PATH}">Close</a>
            <button type="submit" id="{SAVE_BUTTON}" class="save {SAVE_BUTTON}"{disabled}>Save {loader}</button>
        </div>
    </form>
</div>"##,
        container = FORM_CONTAINER,
        patient_error = error_label(form, Field::Patient),
        start = escape(&fields.start_time),
        start_error = error_label(form, Field::StartTime),
        end = escape(&fields.end_time),
        end_error = error_label(form, Field::EndTime),
        location = escape(&fields.location),
        location_error = error_label(form, Field::Location),
        status_error = error_label(form, Field::Status),
        disabled = if form.submit_enabled() { "" } else { " disabled" },
        loader = inline_loader(feedback, SAVE_BUTTON),
    )
}

/// Page body: toolbar, table (or the load error state) and the form.
pub fn render_body(table: Option<&TableView>, draw: Option<&Draw>, form: &AppointmentForm, feedback: &Feedback) -> String {
    let listing = match (table, draw) {
        (Some(table), Some(draw)) if !feedback.has_load_error() => {
            format!(
                r#"<div id="table-filter"{hidden}></div>{table}"#,
                hidden = if feedback.filter_visible() { "" } else { r#" style="display: none;""# },
                table = render_table(table, draw, TABLE_ID, PAGE_PATH),
            )
        }
        _ if feedback.has_load_error() => load_error_state().to_string(),
        _ => String::new(),
    };

    format!(
        r#"<div class="page-actions"><a class="add-appointment button-primary" href="{PAGE_PATH}?create=1">Add Appointment</a></div>
{listing}
{form}"#,
        form = render_form(form, feedback),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::{FormFields, LoadedForm};
    use crate::models::PatientOption;

    #[test]
    fn test_action_links_point_at_routes() {
        let edit = AppointmentActions.render(&RowAction::edit("a b"));
        let delete = AppointmentActions.render(&RowAction::delete("7"));

        assert!(edit.contains(r#"href="/appointments?edit=a%20b""#));
        assert!(delete.contains(r#"action="/appointments/7/delete""#));
    }

    #[test]
    fn test_maps_script_only_with_key() {
        assert!(maps_script("").is_empty());
        assert!(maps_script("k123").contains("key=k123&libraries=places"));
    }

    #[test]
    fn test_form_renders_errors_and_selected_patient() {
        let mut feedback = Feedback::new();
        let mut form = AppointmentForm::new();
        let ticket = form.open_create(&mut feedback).unwrap();
        let patients = vec![PatientOption { patient_id: "42".into(), name: "J. Doe".into() }];
        form.finish_load(ticket, Ok(LoadedForm { patients, record: None }), &mut feedback).unwrap();
        let _ = form.submit(&mut feedback);

        let html = render_form(&form, &feedback);
        assert!(html.contains("Please select a Patient"));
        assert!(html.contains(r#"<option value="J. Doe-42">J. Doe (42)</option>"#));
        assert!(!html.contains(r#"name="id""#));

        let patients = form.patients().to_vec();
        form.resume(
            EditTarget::Update("7".into()),
            FormFields { patient: "J. Doe-42".into(), ..FormFields::default() },
            patients,
        )
        .unwrap();
        let html = render_form(&form, &feedback);
        assert!(html.contains(r#"<option value="J. Doe-42" selected>"#));
        assert!(html.contains(r#"<input type="hidden" name="id" value="7" />"#));
    }
}
