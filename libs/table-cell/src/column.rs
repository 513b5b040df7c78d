/// One rendered column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDescriptor {
    pub key: &'static str,
    pub title: &'static str,
    pub orderable: bool,
}

impl ColumnDescriptor {
    pub const fn new(key: &'static str, title: &'static str) -> Self {
        Self { key, title, orderable: true }
    }

    pub const fn unorderable(mut self) -> Self {
        self.orderable = false;
        self
    }
}

/// A cell's searchable text, optional markup shown instead of the text,
/// and an optional ordering key used instead of the text when sorting.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Cell {
    pub text: String,
    pub html: Option<String>,
    pub order: Option<String>,
}

impl Cell {
    pub fn text(text: impl Into<String>) -> Self {
        Self { text: text.into(), ..Self::default() }
    }

    pub fn html(text: impl Into<String>, html: impl Into<String>) -> Self {
        Self { text: text.into(), html: Some(html.into()), order: None }
    }

    pub fn ordered_by(mut self, key: impl Into<String>) -> Self {
        self.order = Some(key.into());
        self
    }

    pub fn sort_key(&self) -> &str {
        self.order.as_deref().unwrap_or(&self.text)
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::text(value)
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::text(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub id: String,
    pub cells: Vec<Cell>,
    pub css_class: Option<String>,
}

impl TableRow {
    pub fn new(id: impl Into<String>, cells: Vec<Cell>) -> Self {
        Self { id: id.into(), cells, css_class: None }
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.css_class = Some(class.into());
        self
    }

    pub(crate) fn matches(&self, needle: &str) -> bool {
        self.cells
            .iter()
            .any(|cell| cell.text.to_lowercase().contains(needle))
    }
}
