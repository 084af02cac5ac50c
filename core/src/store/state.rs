use tracing::debug;
use uuid::Uuid;

use crate::model::filter::TaskFilters;
use crate::model::snapshot::BoardSnapshot;
use crate::model::task::Task;
use crate::store::action::TaskAction;

/// The single source of truth for a session: tasks in insertion order,
/// the active filters and the free-text search term.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StoreState {
    pub tasks: Vec<Task>,
    pub filters: TaskFilters,
    pub search_term: String,
}

impl StoreState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_snapshot(snapshot: BoardSnapshot) -> Self {
        let mut state = Self {
            filters: snapshot.filters,
            ..Self::default()
        };
        // Replaying through Add drops any duplicate ids a hand-edited file may carry
        for task in snapshot.tasks {
            state.apply(TaskAction::Add(task));
        }
        state
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            tasks: self.tasks.clone(),
            filters: self.filters.clone(),
        }
    }

    /// Pure transition: consumes the current state and returns the next one.
    pub fn reduce(mut self, action: TaskAction) -> Self {
        self.apply(action);
        self
    }

    /// In-place form of [`StoreState::reduce`].
    pub fn apply(&mut self, action: TaskAction) {
        debug!(action = action.kind(), "reducing task action");

        match action {
            TaskAction::Add(task) => {
                if self.position(&task.id).is_some() {
                    debug!(id = %task.id, "add ignored, id already present");
                    return;
                }
                self.tasks.push(task);
            }
            TaskAction::Edit(task) => {
                if let Some(pos) = self.position(&task.id) {
                    let current = &self.tasks[pos];
                    // assigned_on is immutable and completed is toggle-only
                    let replacement = Task {
                        assigned_on: current.assigned_on,
                        completed: current.completed,
                        ..task
                    };
                    self.tasks[pos] = replacement;
                }
            }
            TaskAction::Delete(id) => {
                self.tasks.retain(|t| t.id != id);
            }
            TaskAction::Toggle(id) => {
                if let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) {
                    task.completed = !task.completed;
                }
            }
            TaskAction::SetFilters(filters) => {
                self.filters = filters;
            }
            TaskAction::ResetFilters => {
                self.filters = TaskFilters::default();
            }
            TaskAction::SetSearchTerm(term) => {
                self.search_term = term;
            }
        }
    }

    pub fn find(&self, id: &Uuid) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == *id)
    }

    fn position(&self, id: &Uuid) -> Option<usize> {
        self.tasks.iter().position(|t| t.id == *id)
    }
}
