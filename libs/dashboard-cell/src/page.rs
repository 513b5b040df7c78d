// libs/dashboard-cell/src/page.rs
use tracing::{error, info};

use feedback_cell::render::load_error_state;
use feedback_cell::Feedback;
use navigation_cell::{guard_page, Capability, CapabilitySet, Page, PageExit};
use session_cell::SessionProvider;
use shared_backend::{ApiResource, ResourceClient};
use shared_models::auth::Session;
use table_cell::{render_table, Draw, TableOptions, TableView};

use crate::models::DashboardRecord;
use crate::rows::{dashboard_columns, row_class, DashboardRow};

pub const TABLE_ID: &str = "dashboard";
pub const PAGE_PATH: &str = "/dashboard";

pub fn dashboard_table(records: &[DashboardRecord], capabilities: &CapabilitySet) -> TableView {
    let rows = records
        .iter()
        .enumerate()
        .map(|(index, record)| {
            let id = record.id.clone().unwrap_or_else(|| index.to_string());
            DashboardRow::assemble(record, capabilities).to_table_row(id)
        })
        .collect();

    let options = TableOptions::default()
        .with_toolbar(capabilities.allows(Capability::ExportTables))
        .with_row_class(row_class);

    TableView::new(rows, dashboard_columns(capabilities), options)
}

/// Read-only view joining appointments with their rides.
pub struct DashboardPage {
    session: Session,
    capabilities: CapabilitySet,
    table: Option<TableView>,
    pub feedback: Feedback,
}

impl DashboardPage {
    pub async fn load(provider: &dyn SessionProvider, client: ResourceClient, landing_path: &str) -> Result<Self, PageExit> {
        let session = provider.session().await?;
        guard_page(Page::Dashboard, &session.role, landing_path)?;

        let mut page = Self {
            capabilities: CapabilitySet::for_role(&session.role),
            session,
            table: None,
            feedback: Feedback::new(),
        };
        page.feedback.pre_render();

        match client.get::<Vec<DashboardRecord>>(&ApiResource::Dashboard, &page.session.bearer_token).await {
            Ok(records) => {
                info!("Loaded {} dashboard rows", records.len());
                page.table = Some(dashboard_table(&records, &page.capabilities));
                page.feedback.post_render();
            }
            Err(e) => {
                error!("Failed to load dashboard: {}", e);
                page.feedback.show_load_error();
            }
        }

        Ok(page)
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

    pub fn render_body(&mut self) -> String {
        if self.feedback.has_load_error() {
            return load_error_state().to_string();
        }

        match (self.draw(), self.table.as_ref()) {
            (Some(draw), Some(table)) => format!(
                r#"<div id="table-filter"{hidden}></div>{table}"#,
                hidden = if self.feedback.filter_visible() { "" } else { r#" style="display: none;""# },
                table = render_table(table, &draw, TABLE_ID, PAGE_PATH),
            ),
            _ => String::new(),
        }
    }
}
