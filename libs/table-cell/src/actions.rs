use feedback_cell::render::escape;

use crate::column::TableRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    Edit,
    Delete,
}

impl ActionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionKind::Edit => "edit",
            ActionKind::Delete => "delete",
        }
    }
}

/// An action bound to one rendered row.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RowAction {
    pub kind: ActionKind,
    pub target_id: String,
}

impl RowAction {
    pub fn edit(target_id: impl Into<String>) -> Self {
        Self { kind: ActionKind::Edit, target_id: target_id.into() }
    }

    pub fn delete(target_id: impl Into<String>) -> Self {
        Self { kind: ActionKind::Delete, target_id: target_id.into() }
    }
}

/// Produces the action column for each row.
pub trait ActionRenderer: Send + Sync {
    fn actions(&self, row: &TableRow) -> Vec<RowAction>;

    fn render(&self, action: &RowAction) -> String {
        let (class, label) = match action.kind {
            ActionKind::Edit => ("button-secondary edit-button", "Edit"),
            ActionKind::Delete => ("button-danger delete-button", "Delete"),
        };
        format!(
            r#"<button type="button" class="{class}" data-action="{kind}" data-id="{id}">{label}</button>"#,
            kind = action.kind.as_str(),
            id = escape(&action.target_id),
        )
    }
}

/// Edit and delete for every row.
#[derive(Debug, Default, Clone, Copy)]
pub struct EditDeleteActions;

impl ActionRenderer for EditDeleteActions {
    fn actions(&self, row: &TableRow) -> Vec<RowAction> {
        vec![RowAction::edit(&row.id), RowAction::delete(&row.id)]
    }
}
