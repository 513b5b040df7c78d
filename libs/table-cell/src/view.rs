use std::cmp::Ordering;
use std::collections::HashSet;
use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

use shared_utils::generation::{RequestGeneration, Ticket};

use crate::actions::{ActionRenderer, RowAction};
use crate::column::{ColumnDescriptor, TableRow};

/// Page-size menu entries.
pub const PAGE_SIZES: [usize; 4] = [10, 25, 50, 100];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TableError {
    #[error("action belongs to a previous draw")]
    StaleDraw,
    #[error("row {0} has no such action in the current draw")]
    UnboundAction(String),
    #[error("page size {0} is not offered")]
    PageSize(usize),
    #[error("column {0} cannot be ordered")]
    Column(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

type RowClassHook = Arc<dyn Fn(&TableRow) -> Option<String> + Send + Sync>;

#[derive(Clone)]
pub struct TableOptions {
    pub page_size: usize,
    /// Export controls above the table.
    pub toolbar: bool,
    pub actions: Option<Arc<dyn ActionRenderer>>,
    pub row_class: Option<RowClassHook>,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            page_size: PAGE_SIZES[0],
            toolbar: false,
            actions: None,
            row_class: None,
        }
    }
}

impl std::fmt::Debug for TableOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TableOptions")
            .field("page_size", &self.page_size)
            .field("toolbar", &self.toolbar)
            .field("actions", &self.actions.is_some())
            .field("row_class", &self.row_class.is_some())
            .finish()
    }
}

impl TableOptions {
    pub fn with_actions(mut self, actions: impl ActionRenderer + 'static) -> Self {
        self.actions = Some(Arc::new(actions));
        self
    }

    pub fn with_toolbar(mut self, toolbar: bool) -> Self {
        self.toolbar = toolbar;
        self
    }

    pub fn with_row_class<F>(mut self, hook: F) -> Self
    where
        F: Fn(&TableRow) -> Option<String> + Send + Sync + 'static,
    {
        self.row_class = Some(Arc::new(hook));
        self
    }
}

/// A rendered row together with the actions bound to it in this draw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawnRow {
    pub row: TableRow,
    pub actions: Vec<RowAction>,
}

/// Result of one draw.
#[derive(Debug, Clone)]
pub struct Draw {
    pub ticket: Ticket,
    pub rows: Vec<DrawnRow>,
    pub page: usize,
    pub pages: usize,
    pub page_size: usize,
    pub total: usize,
    pub filtered: usize,
    pub search: String,
    pub order: (usize, Direction),
    pub pagination_visible: bool,
    pub toolbar_visible: bool,
    pub has_actions: bool,
}

impl Draw {
    /// 1-based range of the rows shown, for the "Showing x to y of z" line.
    pub fn showing(&self) -> (usize, usize) {
        if self.rows.is_empty() {
            (0, 0)
        } else {
            let start = self.page * self.page_size + 1;
            (start, start + self.rows.len() - 1)
        }
    }
}

pub struct TableView {
    columns: Vec<ColumnDescriptor>,
    rows: Vec<TableRow>,
    options: TableOptions,
    search: String,
    order: (usize, Direction),
    page: usize,
    draws: RequestGeneration,
    bindings: HashSet<RowAction>,
}

impl TableView {
    pub fn new(rows: Vec<TableRow>, columns: Vec<ColumnDescriptor>, options: TableOptions) -> Self {
        let mut options = options;
        if !PAGE_SIZES.contains(&options.page_size) {
            options.page_size = PAGE_SIZES[0];
        }

        Self {
            columns,
            rows,
            options,
            search: String::new(),
            order: (0, Direction::Ascending),
            page: 0,
            draws: RequestGeneration::new(),
            bindings: HashSet::new(),
        }
    }

    pub fn columns(&self) -> &[ColumnDescriptor] {
        &self.columns
    }

    pub fn options(&self) -> &TableOptions {
        &self.options
    }

    pub fn set_search(&mut self, query: &str) {
        self.search = query.trim().to_string();
        self.page = 0;
    }

    pub fn set_order(&mut self, column: usize, direction: Direction) -> Result<(), TableError> {
        match self.columns.get(column) {
            Some(descriptor) if descriptor.orderable => {
                self.order = (column, direction);
                Ok(())
            }
            _ => Err(TableError::Column(column)),
        }
    }

    pub fn set_page_size(&mut self, size: usize) -> Result<(), TableError> {
        if !PAGE_SIZES.contains(&size) {
            return Err(TableError::PageSize(size));
        }
        self.options.page_size = size;
        self.page = 0;
        Ok(())
    }

    /// Moves to `page` (0-based); clamped to the last page on draw.
    pub fn set_page(&mut self, page: usize) {
        self.page = page;
    }

    /// Rows matching the search, in display order, across every page.
    pub fn filtered_rows(&self) -> Vec<&TableRow> {
        let needle = self.search.to_lowercase();
        let mut rows: Vec<&TableRow> = self
            .rows
            .iter()
            .filter(|row| needle.is_empty() || row.matches(&needle))
            .collect();

        let (column, direction) = self.order;
        rows.sort_by(|a, b| {
            let ordering = compare_cells(a, b, column);
            match direction {
                Direction::Ascending => ordering,
                Direction::Descending => ordering.reverse(),
            }
        });
        rows
    }

    /// Renders the current state. Every draw replaces the action bindings
    /// of the previous one.
    pub fn draw(&mut self) -> Draw {
        let page_size = self.options.page_size;
        let filtered: Vec<TableRow> = self.filtered_rows().into_iter().cloned().collect();
        let pages = filtered.len().div_ceil(page_size);
        let page = self.page.min(pages.saturating_sub(1));
        self.page = page;

        let ticket = self.draws.begin();
        self.bindings.clear();

        let rows: Vec<DrawnRow> = filtered
            .iter()
            .skip(page * page_size)
            .take(page_size)
            .map(|row| {
                let mut row = row.clone();
                if let Some(hook) = &self.options.row_class {
                    if let Some(class) = hook(&row) {
                        row.css_class = Some(class);
                    }
                }
                let actions = self
                    .options
                    .actions
                    .as_ref()
                    .map(|renderer| renderer.actions(&row))
                    .unwrap_or_default();
                self.bindings.extend(actions.iter().cloned());
                DrawnRow { row, actions }
            })
            .collect();

        debug!(
            "Table draw {}: {} of {} rows, page {}/{}",
            ticket.generation(),
            rows.len(),
            filtered.len(),
            page + 1,
            pages.max(1)
        );

        Draw {
            ticket,
            rows,
            page,
            pages,
            page_size,
            total: self.rows.len(),
            filtered: filtered.len(),
            search: self.search.clone(),
            order: self.order,
            pagination_visible: pages > 1,
            toolbar_visible: self.options.toolbar,
            has_actions: self.options.actions.is_some(),
        }
    }

    /// Resolves an action against the latest draw.
    pub fn dispatch(&self, ticket: Ticket, action: &RowAction) -> Result<RowAction, TableError> {
        if !self.draws.is_current(ticket) {
            return Err(TableError::StaleDraw);
        }
        if !self.bindings.contains(action) {
            return Err(TableError::UnboundAction(action.target_id.clone()));
        }
        Ok(action.clone())
    }
}

fn compare_cells(a: &TableRow, b: &TableRow, column: usize) -> Ordering {
    let left = a.cells.get(column).map(|c| c.sort_key()).unwrap_or("");
    let right = b.cells.get(column).map(|c| c.sort_key()).unwrap_or("");

    match (left.trim().parse::<f64>(), right.trim().parse::<f64>()) {
        (Ok(l), Ok(r)) => l.partial_cmp(&r).unwrap_or(Ordering::Equal),
        _ => left.to_lowercase().cmp(&right.to_lowercase()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::EditDeleteActions;
    use crate::column::Cell;
    use assert_matches::assert_matches;

    fn columns() -> Vec<ColumnDescriptor> {
        vec![ColumnDescriptor::new("name", "Name"), ColumnDescriptor::new("count", "Count")]
    }

    fn rows(n: usize) -> Vec<TableRow> {
        (0..n)
            .map(|i| TableRow::new(i.to_string(), vec![Cell::text(format!("Row {:03}", i)), Cell::text(i.to_string())]))
            .collect()
    }

    #[test]
    fn test_pagination_hidden_when_rows_fit_one_page() {
        let mut table = TableView::new(rows(10), columns(), TableOptions::default());
        let draw = table.draw();
        assert!(!draw.pagination_visible);
        assert_eq!(draw.pages, 1);

        let mut table = TableView::new(rows(11), columns(), TableOptions::default());
        assert!(table.draw().pagination_visible);
    }

    #[test]
    fn test_pagination_reevaluated_after_page_size_change() {
        let mut table = TableView::new(rows(30), columns(), TableOptions::default());
        assert!(table.draw().pagination_visible);

        table.set_page_size(50).unwrap();
        let draw = table.draw();
        assert!(!draw.pagination_visible);
        assert_eq!(draw.rows.len(), 30);
    }

    #[test]
    fn test_pagination_reevaluated_after_search() {
        let mut table = TableView::new(rows(25), columns(), TableOptions::default());
        table.set_search("row 02");
        let draw = table.draw();

        assert_eq!(draw.filtered, 5);
        assert!(!draw.pagination_visible);
    }

    #[test]
    fn test_unknown_page_size_rejected() {
        let mut table = TableView::new(rows(3), columns(), TableOptions::default());
        assert_eq!(table.set_page_size(20), Err(TableError::PageSize(20)));
    }

    #[test]
    fn test_numeric_columns_sort_numerically() {
        let mut table = TableView::new(rows(12), columns(), TableOptions::default());
        table.set_order(1, Direction::Descending).unwrap();
        let draw = table.draw();

        assert_eq!(draw.rows[0].row.id, "11");
        assert_eq!(draw.rows[1].row.id, "10");
        assert_eq!(draw.rows[2].row.id, "9");
    }

    #[test]
    fn test_page_clamped_to_last() {
        let mut table = TableView::new(rows(15), columns(), TableOptions::default());
        table.set_page(7);
        let draw = table.draw();

        assert_eq!(draw.page, 1);
        assert_eq!(draw.showing(), (11, 15));
    }

    #[test]
    fn test_actions_only_dispatch_against_latest_draw() {
        let options = TableOptions::default().with_actions(EditDeleteActions);
        let mut table = TableView::new(rows(15), columns(), options);

        let first = table.draw();
        assert_eq!(table.dispatch(first.ticket, &RowAction::edit("3")), Ok(RowAction::edit("3")));

        table.set_page(1);
        let second = table.draw();
        assert_eq!(table.dispatch(first.ticket, &RowAction::edit("3")), Err(TableError::StaleDraw));
        assert_matches!(
            table.dispatch(second.ticket, &RowAction::delete("3")),
            Err(TableError::UnboundAction(id)) if id == "3"
        );
        assert!(table.dispatch(second.ticket, &RowAction::delete("12")).is_ok());
    }

    #[test]
    fn test_row_class_hook_applied() {
        let options = TableOptions::default()
            .with_row_class(|row| (row.id == "1").then(|| "bg-danger-light".to_string()));
        let mut table = TableView::new(rows(3), columns(), options);
        let draw = table.draw();

        assert_eq!(draw.rows[1].row.css_class.as_deref(), Some("bg-danger-light"));
        assert_eq!(draw.rows[0].row.css_class, None);
    }
}
