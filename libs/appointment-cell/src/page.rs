// libs/appointment-cell/src/page.rs
use tracing::{error, info};

use feedback_cell::{Feedback, PageEffect};
use navigation_cell::{guard_page, Capability, CapabilitySet, Page, PageExit};
use session_cell::SessionProvider;
use shared_models::auth::Session;
use shared_utils::generation::Ticket;
use shared_utils::timezone::to_list_display;
use table_cell::{ActionKind, Cell, ColumnDescriptor, Draw, RowAction, TableOptions, TableRow, TableView};

use crate::api::AppointmentApi;
use crate::delete::DeleteFlow;
use crate::form::{AppointmentForm, FormError, FormFields, LoadedForm};
use crate::models::{AppointmentSummary, EditTarget};
use crate::views::AppointmentActions;

pub fn appointment_columns() -> Vec<ColumnDescriptor> {
    vec![
        ColumnDescriptor::new("id", "ID"),
        ColumnDescriptor::new("patient_name", "Patient Name"),
        ColumnDescriptor::new("start_time", "Start Time"),
        ColumnDescriptor::new("end_time", "End Time"),
        ColumnDescriptor::new("location", "Location"),
        ColumnDescriptor::new("status", "Status"),
    ]
}

pub fn appointment_row(record: &AppointmentSummary) -> TableRow {
    TableRow::new(
        record.id.clone(),
        vec![
            Cell::text(record.id.clone()),
            Cell::text(record.patient_name.clone()),
            Cell::text(to_list_display(record.start_time)).ordered_by(record.start_time.to_rfc3339()),
            Cell::text(to_list_display(record.end_time)).ordered_by(record.end_time.to_rfc3339()),
            Cell::text(record.location.clone()),
            Cell::text(record.status.clone()),
        ],
    )
}

pub fn appointments_table(records: &[AppointmentSummary], capabilities: &CapabilitySet) -> TableView {
    let options = TableOptions::default()
        .with_actions(AppointmentActions)
        .with_toolbar(capabilities.allows(Capability::ExportTables));

    TableView::new(records.iter().map(appointment_row).collect(), appointment_columns(), options)
}

/// The appointments page: list, edit form and delete flow for one session.
pub struct AppointmentsPage {
    session: Session,
    capabilities: CapabilitySet,
    api: AppointmentApi,
    table: Option<TableView>,
    pub feedback: Feedback,
    pub form: AppointmentForm,
    pub deletion: DeleteFlow,
}

impl AppointmentsPage {
    /// Resolves the session and checks the role before anything is fetched.
    pub async fn open(provider: &dyn SessionProvider, api: AppointmentApi, landing_path: &str) -> Result<Self, PageExit> {
        let session = provider.session().await?;
        guard_page(Page::Appointments, &session.role, landing_path)?;

        Ok(Self {
            capabilities: CapabilitySet::for_role(&session.role),
            session,
            api,
            table: None,
            feedback: Feedback::new(),
            form: AppointmentForm::new(),
            deletion: DeleteFlow::new(),
        })
    }

    /// [`open`](Self::open) followed by the list fetch.
    pub async fn load(provider: &dyn SessionProvider, api: AppointmentApi, landing_path: &str) -> Result<Self, PageExit> {
        let mut page = Self::open(provider, api, landing_path).await?;
        page.load_list().await;
        Ok(page)
    }

    pub async fn load_list(&mut self) {
        self.feedback.pre_render();

        match self.api.list(&self.session.bearer_token).await {
            Ok(records) => {
                info!("Loaded {} appointments", records.len());
                self.table = Some(appointments_table(&records, &self.capabilities));
                self.feedback.post_render();
            }
            Err(e) => {
                error!("Failed to load appointments: {}", e);
                self.feedback.show_load_error();
            }
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn capabilities(&self) -> &CapabilitySet {
        &self.capabilities
    }

    pub fn table(&self) -> Option<&TableView> {
        self.table.as_ref()
    }

    pub fn table_mut(&mut self) -> Option<&mut TableView> {
        self.table.as_mut()
    }

    pub fn draw(&mut self) -> Option<Draw> {
        self.table.as_mut().map(TableView::draw)
    }

    pub async fn open_create(&mut self) -> Result<(), FormError> {
        let ticket = self.form.open_create(&mut self.feedback)?;
        let result = self
            .api
            .patients(&self.session.bearer_token)
            .await
            .map(|patients| LoadedForm { patients, record: None });
        self.form.finish_load(ticket, result, &mut self.feedback)
    }

    /// Patient list first, then the record.
    pub async fn open_edit(&mut self, id: &str) -> Result<(), FormError> {
        let ticket = self.form.open_edit(id, &mut self.feedback)?;
        let token = &self.session.bearer_token;

        let result = match self.api.patients(token).await {
            Ok(patients) => self
                .api
                .get(token, id)
                .await
                .map(|record| LoadedForm { patients, record: Some(record) }),
            Err(e) => Err(e),
        };
        self.form.finish_load(ticket, result, &mut self.feedback)
    }

    /// Puts values posted from the browser back into the form.
    pub async fn resume_form(&mut self, target: EditTarget, fields: FormFields) -> Result<(), FormError> {
        let patients = match self.api.patients(&self.session.bearer_token).await {
            Ok(patients) => patients,
            Err(e) => {
                error!("Failed to load patients: {}", e);
                Vec::new()
            }
        };
        self.form.resume(target, fields, patients)
    }

    pub async fn submit(&mut self) -> Result<PageEffect, FormError> {
        let submission = self.form.submit(&mut self.feedback)?;
        let result = self
            .api
            .save(&self.session.bearer_token, &submission.target, &submission.payload)
            .await;
        self.form.finish_submit(submission.ticket, result, &mut self.feedback)
    }

    pub fn close_form(&mut self) {
        self.form.close(&mut self.feedback);
    }

    pub async fn delete(&mut self, id: &str) -> Result<PageEffect, FormError> {
        let ticket = self.deletion.begin(id, &mut self.feedback)?;
        let result = self.api.delete(&self.session.bearer_token, id).await;
        self.deletion.finish(ticket, result, &mut self.feedback)
    }

    /// Runs a row action from the latest draw.
    pub async fn trigger(&mut self, draw: Ticket, action: &RowAction) -> Result<PageEffect, FormError> {
        let table = self.table.as_ref().ok_or(FormError::NotOpen)?;
        let action = table.dispatch(draw, action)?;

        match action.kind {
            ActionKind::Edit => {
                self.open_edit(&action.target_id).await?;
                Ok(PageEffect::Stay)
            }
            ActionKind::Delete => self.delete(&action.target_id).await,
        }
    }
}
