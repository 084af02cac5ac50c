use uuid::Uuid;

use crate::model::filter::TaskFilters;
use crate::model::task::Task;

/// Every state change the store accepts.
#[derive(Debug, Clone, PartialEq)]
pub enum TaskAction {
    /// Appends a fully built task. Ignored if the id is already held.
    Add(Task),
    /// Replaces the task with the same id in place.
    Edit(Task),
    Delete(Uuid),
    Toggle(Uuid),
    /// Replaces the whole filter object; no merging happens here.
    SetFilters(TaskFilters),
    ResetFilters,
    SetSearchTerm(String),
}

impl TaskAction {
    pub fn kind(&self) -> &'static str {
        match self {
            TaskAction::Add(_) => "add",
            TaskAction::Edit(_) => "edit",
            TaskAction::Delete(_) => "delete",
            TaskAction::Toggle(_) => "toggle",
            TaskAction::SetFilters(_) => "set_filters",
            TaskAction::ResetFilters => "reset_filters",
            TaskAction::SetSearchTerm(_) => "set_search_term",
        }
    }
}
