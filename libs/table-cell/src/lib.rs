//! Searchable, sortable, paged tables with per-row edit/delete actions.

pub mod actions;
pub mod column;
pub mod export;
pub mod render;
pub mod view;

pub use actions::{ActionKind, ActionRenderer, EditDeleteActions, RowAction};
pub use column::{Cell, ColumnDescriptor, TableRow};
pub use export::export_csv;
pub use render::{render_table, TableQuery};
pub use view::{Direction, Draw, DrawnRow, TableError, TableOptions, TableView, PAGE_SIZES};
