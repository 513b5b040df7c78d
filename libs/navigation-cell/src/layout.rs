//! Page shell shared by every dashboard page.

use std::time::Duration;

use feedback_cell::render::{banners, escape, page_spinner, BANNER_SCRIPT};
use feedback_cell::Feedback;
use shared_models::auth::Role;

use crate::nav::{apply_role_visibility, NavEntry};

/// Everything the shell needs around a page body.
pub struct PageShell<'a> {
    pub title: &'a str,
    pub active: NavEntry,
    pub role: &'a Role,
    pub feedback: &'a Feedback,
    pub body: String,
    /// Extra `<head>` markup, e.g. third-party scripts.
    pub head: String,
    /// Reload `path` once `after` has passed.
    pub refresh: Option<(Duration, String)>,
}

impl<'a> PageShell<'a> {
    pub fn new(title: &'a str, active: NavEntry, role: &'a Role, feedback: &'a Feedback, body: String) -> Self {
        Self {
            title,
            active,
            role,
            feedback,
            body,
            head: String::new(),
            refresh: None,
        }
    }

    pub fn with_head(mut self, head: String) -> Self {
        self.head = head;
        self
    }

    pub fn reload_after(mut self, after: Duration, path: impl Into<String>) -> Self {
        self.refresh = Some((after, path.into()));
        self
    }
}

fn sidebar(role: &Role, active: NavEntry) -> String {
    let items: String = apply_role_visibility(role)
        .into_iter()
        .map(|item| {
            format!(
                r##"<li id="{id}" class="nav-item {visibility}{active}"><a href="{href}">{label}</a></li>"##,
                id = item.entry.element_id(),
                visibility = if item.visible { "visible" } else { "invisible" },
                active = if item.entry == active { " active" } else { "" },
                href = item.entry.href(),
                label = item.entry.label(),
            )
        })
        .collect();

    format!(
        r##"<aside id="sideNavBar" class="side-nav">
        <ul class="nav-list">{items}</ul>
        <a id="settingsToggler" class="nav-settings" href="/settings">Settings</a>
        <form method="post" action="/logout"><button id="logout" type="submit" class="button-secondary">Logout</button></form>
    </aside>"##
    )
}

pub fn render_page(shell: &PageShell<'_>) -> String {
    let refresh = match &shell.refresh {
        Some((after, path)) => format!(
            r#"<meta http-equiv="refresh" content="{}; url={}">"#,
            after.as_secs_f32(),
            escape(path)
        ),
        None => String::new(),
    };

    format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title} - EHR Dashboard</title>
    <link rel="stylesheet" href="/assets/style.css">
    {refresh}
    {head}
</head>
<body>
<div id="root" class="d-flex">
    {sidebar}
    <main class="flex-1">
        <h1 class="page-title">{title}</h1>
        {spinner}
        <div id="StateChange">{body}</div>
    </main>
    {banners}
</div>
{script}
</body>
</html>"##,
        title = escape(shell.title),
        head = shell.head,
        sidebar = sidebar(shell.role, shell.active),
        spinner = page_spinner(shell.feedback),
        body = shell.body,
        banners = banners(shell.feedback),
        script = BANNER_SCRIPT,
    )
}
