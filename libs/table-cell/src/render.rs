use serde::Deserialize;

use feedback_cell::render::escape;

use crate::view::{Direction, Draw, TableView, PAGE_SIZES};

/// Table state carried in the page's query string.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct TableQuery {
    pub search: Option<String>,
    pub order: Option<usize>,
    pub dir: Option<String>,
    pub page: Option<usize>,
    pub length: Option<usize>,
}

impl TableQuery {
    /// Applies the query to `table`. Invalid values are ignored.
    pub fn apply(&self, table: &mut TableView) {
        if let Some(length) = self.length {
            let _ = table.set_page_size(length);
        }
        if let Some(search) = &self.search {
            table.set_search(search);
        }
        if let Some(column) = self.order {
            let direction = match self.dir.as_deref() {
                Some("desc") => Direction::Descending,
                _ => Direction::Ascending,
            };
            let _ = table.set_order(column, direction);
        }
        if let Some(page) = self.page {
            table.set_page(page);
        }
    }
}

fn href(base: &str, draw: &Draw, order: (usize, Direction), page: usize, length: usize) -> String {
    let dir = match order.1 {
        Direction::Ascending => "asc",
        Direction::Descending => "desc",
    };
    format!(
        "{base}?search={search}&order={column}&dir={dir}&page={page}&length={length}",
        search = urlencoding::encode(&draw.search),
        column = order.0,
    )
}

/// Renders `draw` as the table, its search box, the export toolbar and the
/// pagination controls. `base` is the page path links point back to.
pub fn render_table(table: &TableView, draw: &Draw, table_id: &str, base: &str) -> String {
    let mut html = String::new();

    if draw.toolbar_visible {
        html.push_str(&format!(
            r#"<div class="dt-buttons"><a class="button-secondary" href="{}&export=csv">CSV</a></div>"#,
            escape(&href(base, draw, draw.order, draw.page, draw.page_size)),
        ));
    }

    html.push_str(&format!(
        r#"<form class="dataTables_filter" method="get" action="{base}"><label>Search: <input type="search" name="search" value="{search}" /></label><input type="hidden" name="length" value="{length}" /></form>"#,
        base = escape(base),
        search = escape(&draw.search),
        length = draw.page_size,
    ));

    html.push_str(&format!(r#"<table id="{}" class="display"><thead><tr>"#, escape(table_id)));
    for (index, column) in table.columns().iter().enumerate() {
        if !column.orderable {
            html.push_str(&format!("<th>{}</th>", escape(column.title)));
            continue;
        }
        let (class, next) = match draw.order {
            (current, Direction::Ascending) if current == index => ("sorting_asc", Direction::Descending),
            (current, Direction::Descending) if current == index => ("sorting_desc", Direction::Ascending),
            _ => ("sorting", Direction::Ascending),
        };
        html.push_str(&format!(
            r#"<th class="{class}"><a href="{link}">{title}</a></th>"#,
            link = escape(&href(base, draw, (index, next), 0, draw.page_size)),
            title = escape(column.title),
        ));
    }
    if draw.has_actions {
        html.push_str("<th>Actions</th>");
    }
    html.push_str("</tr></thead><tbody>");

    if draw.rows.is_empty() {
        let span = table.columns().len() + usize::from(draw.has_actions);
        html.push_str(&format!(
            r#"<tr><td colspan="{span}" class="dataTables_empty">No data available in table</td></tr>"#
        ));
    }

    for drawn in &draw.rows {
        match &drawn.row.css_class {
            Some(class) => html.push_str(&format!(
                r#"<tr id="{}" class="{}">"#,
                escape(&drawn.row.id),
                escape(class)
            )),
            None => html.push_str(&format!(r#"<tr id="{}">"#, escape(&drawn.row.id))),
        }
        for cell in &drawn.row.cells {
            let content = match &cell.html {
                Some(markup) => markup.clone(),
                None => escape(&cell.text),
            };
            match &cell.order {
                Some(order) => html.push_str(&format!(r#"<td data-order="{}">{}</td>"#, escape(order), content)),
                None => html.push_str(&format!("<td>{}</td>", content)),
            }
        }
        if let Some(renderer) = &table.options().actions {
            html.push_str("<td>");
            for action in &drawn.actions {
                html.push_str(&renderer.render(action));
            }
            html.push_str("</td>");
        }
        html.push_str("</tr>");
    }
    html.push_str("</tbody></table>");

    let (start, end) = draw.showing();
    html.push_str(&format!(
        r#"<div class="dataTables_info">Showing {start} to {end} of {} entries</div>"#,
        draw.filtered
    ));

    if draw.pagination_visible {
        html.push_str(r#"<div class="dataTables_length">"#);
        for size in PAGE_SIZES {
            html.push_str(&format!(
                r#"<a class="{class}" href="{link}">{size}</a>"#,
                class = if size == draw.page_size { "current" } else { "" },
                link = escape(&href(base, draw, draw.order, 0, size)),
            ));
        }
        html.push_str(r#"</div><div class="dataTables_paginate">"#);
        for page in 0..draw.pages {
            html.push_str(&format!(
                r#"<a class="paginate_button{current}" href="{link}">{label}</a>"#,
                current = if page == draw.page { " current" } else { "" },
                link = escape(&href(base, draw, draw.order, page, draw.page_size)),
                label = page + 1,
            ));
        }
        html.push_str("</div>");
    }

    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::EditDeleteActions;
    use crate::column::{Cell, ColumnDescriptor, TableRow};
    use crate::view::TableOptions;

    fn table(n: usize, options: TableOptions) -> TableView {
        let rows = (0..n)
            .map(|i| TableRow::new(format!("r{}", i), vec![Cell::text(format!("<Patient {}>", i))]))
            .collect();
        TableView::new(rows, vec![ColumnDescriptor::new("patient", "Patient")], options)
    }

    #[test]
    fn test_single_page_hides_pagination_controls() {
        let mut view = table(3, TableOptions::default());
        let draw = view.draw();
        let html = render_table(&view, &draw, "table", "/appointments");

        assert!(!html.contains("dataTables_paginate"));
        assert!(!html.contains("dataTables_length"));
        assert!(html.contains("&lt;Patient 0&gt;"));
        assert!(html.contains("Showing 1 to 3 of 3 entries"));
    }

    #[test]
    fn test_toolbar_and_actions_rendered_when_enabled() {
        let options = TableOptions::default().with_actions(EditDeleteActions).with_toolbar(true);
        let mut view = table(12, options);
        let draw = view.draw();
        let html = render_table(&view, &draw, "table", "/appointments");

        assert!(html.contains("export=csv"));
        assert!(html.contains(r#"data-action="delete" data-id="r0""#));
        assert!(html.contains("dataTables_paginate"));
    }

    #[test]
    fn test_query_applies_state() {
        let mut view = table(30, TableOptions::default());
        let query = TableQuery {
            search: Some("patient 1".to_string()),
            order: Some(0),
            dir: Some("desc".to_string()),
            page: None,
            length: Some(25),
        };
        query.apply(&mut view);
        let draw = view.draw();

        assert_eq!(draw.page_size, 25);
        assert_eq!(draw.filtered, 11);
        assert_eq!(draw.order, (0, Direction::Descending));
    }
}
