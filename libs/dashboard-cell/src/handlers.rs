// libs/dashboard-cell/src/handlers.rs
use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{header, HeaderMap},
    response::{Html, IntoResponse, Response},
};
use serde::Deserialize;
use tracing::debug;

use navigation_cell::{render_page, Capability, NavEntry, PageExit, PageShell};
use session_cell::CognitoSessionProvider;
use shared_backend::ResourceClient;
use shared_config::AppConfig;
use table_cell::{export_csv, TableQuery};

use crate::page::DashboardPage;

#[derive(Debug, Default, Deserialize)]
pub struct ExportQuery {
    pub export: Option<String>,
}

pub async fn dashboard_page(
    State(config): State<Arc<AppConfig>>,
    headers: HeaderMap,
    Query(query): Query<ExportQuery>,
    Query(table_query): Query<TableQuery>,
) -> Result<Response, PageExit> {
    let provider = CognitoSessionProvider::from_headers(Arc::clone(&config), &headers);
    let mut page = DashboardPage::load(&provider, ResourceClient::new(&config), &config.landing_path).await?;

    if let Some(table) = page.table_mut() {
        table_query.apply(table);
    }

    if query.export.is_some() && page.capabilities().allows(Capability::ExportTables) {
        if let Some(table) = page.table() {
            debug!("Exporting dashboard table");
            return Ok((
                [
                    (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
                    (header::CONTENT_DISPOSITION, "attachment; filename=\"dashboard.csv\""),
                ],
                export_csv(table),
            )
                .into_response());
        }
    }

    let body = page.render_body();
    let role = page.session().role.clone();
    let shell = PageShell::new("Dashboard", NavEntry::Dashboard, &role, &page.feedback, body);

    Ok(Html(render_page(&shell)).into_response())
}
