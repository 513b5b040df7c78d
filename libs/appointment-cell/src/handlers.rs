// libs/appointment-cell/src/handlers.rs
use std::sync::Arc;

use axum::{
    extract::{Form, Path, Query, State},
    http::{header, HeaderMap},
    response::{Html, IntoResponse, Response},
};
use serde::Deserialize;
use tracing::{debug, warn};

use feedback_cell::PageEffect;
use navigation_cell::{render_page, Capability, NavEntry, PageExit, PageShell};
use session_cell::CognitoSessionProvider;
use shared_backend::ResourceClient;
use shared_config::AppConfig;
use table_cell::{export_csv, TableQuery};

use crate::api::AppointmentApi;
use crate::form::{FormError, FormFields};
use crate::models::EditTarget;
use crate::page::AppointmentsPage;
use crate::state::AppointmentState;
use crate::views::{maps_script, render_body, PAGE_PATH};

// ==============================================================================
// QUERY AND FORM STRUCTS
// ==============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub edit: Option<String>,
    pub create: Option<String>,
    pub export: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SaveForm {
    #[serde(default)]
    pub id: String,
    #[serde(flatten)]
    pub fields: FormFields,
}

// ==============================================================================
// HANDLERS
// ==============================================================================

async fn load_page(config: &Arc<AppConfig>, headers: &HeaderMap) -> Result<AppointmentsPage, PageExit> {
    let provider = CognitoSessionProvider::from_headers(Arc::clone(config), headers);
    let api = AppointmentApi::new(ResourceClient::new(config));
    AppointmentsPage::load(&provider, api, &config.landing_path).await
}

fn render(page: &mut AppointmentsPage, config: &AppConfig, effect: PageEffect) -> Response {
    let draw = page.draw();
    let body = render_body(page.table(), draw.as_ref(), &page.form, &page.feedback);

    let role = page.session().role.clone();
    let mut shell = PageShell::new("Appointments", NavEntry::Appointments, &role, &page.feedback, body)
        .with_head(maps_script(&config.maps_api_key));
    if let PageEffect::Reload { after } = effect {
        shell = shell.reload_after(after, PAGE_PATH);
    }

    Html(render_page(&shell)).into_response()
}

pub async fn appointments_page(
    State(state): State<AppointmentState>,
    headers: HeaderMap,
    Query(query): Query<PageQuery>,
    Query(table_query): Query<TableQuery>,
) -> Result<Response, PageExit> {
    let config = &state.config;
    let mut page = load_page(config, &headers).await?;

    if let Some(table) = page.table_mut() {
        table_query.apply(table);
    }

    if query.export.is_some() && page.capabilities().allows(Capability::ExportTables) {
        if let Some(table) = page.table() {
            debug!("Exporting appointments table");
            return Ok((
                [
                    (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
                    (header::CONTENT_DISPOSITION, "attachment; filename=\"appointments.csv\""),
                ],
                export_csv(table),
            )
                .into_response());
        }
    }

    if query.create.is_some() {
        if let Err(e) = page.open_create().await {
            warn!("Create form not opened: {}", e);
        }
    } else if let Some(id) = query.edit.as_deref() {
        if let Err(e) = page.open_edit(id).await {
            warn!("Edit form for {} not opened: {}", id, e);
        }
    }

    Ok(render(&mut page, config, PageEffect::Stay))
}

pub async fn save_appointment(
    State(state): State<AppointmentState>,
    headers: HeaderMap,
    Form(form): Form<SaveForm>,
) -> Result<Response, PageExit> {
    let config = &state.config;
    let mut page = load_page(config, &headers).await?;

    let Some(_pending) = state.claim(&page.session().subject) else {
        warn!("Save ignored: a previous save or delete is still in flight");
        return Ok(render(&mut page, config, PageEffect::Stay));
    };

    let target = match form.id.trim() {
        "" => EditTarget::Create,
        id => EditTarget::Update(id.to_string()),
    };

    let effect = match page.resume_form(target, form.fields).await {
        Ok(()) => match page.submit().await {
            Ok(effect) => effect,
            Err(FormError::Invalid(_)) => PageEffect::Stay,
            Err(e) => {
                warn!("Save rejected: {}", e);
                PageEffect::Stay
            }
        },
        Err(e) => {
            warn!("Form could not be resumed: {}", e);
            PageEffect::Stay
        }
    };

    Ok(render(&mut page, config, effect))
}

pub async fn delete_appointment(
    State(state): State<AppointmentState>,
    headers: HeaderMap,
    Path(appointment_id): Path<String>,
) -> Result<Response, PageExit> {
    let config = &state.config;
    let mut page = load_page(config, &headers).await?;

    let Some(_pending) = state.claim(&page.session().subject) else {
        warn!("Delete of {} ignored: a previous save or delete is still in flight", appointment_id);
        return Ok(render(&mut page, config, PageEffect::Stay));
    };

    let effect = page.delete(&appointment_id).await.unwrap_or_else(|e| {
        warn!("Delete rejected: {}", e);
        PageEffect::Stay
    });

    Ok(render(&mut page, config, effect))
}
