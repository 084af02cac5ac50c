use chrono::{DateTime, NaiveDate, Utc};
use tracing::debug;
use uuid::Uuid;

use crate::model::filter::TaskFilters;
use crate::model::snapshot::BoardSnapshot;
use crate::model::task::{Task, TaskDraft};
use crate::query::filter_tasks;
use crate::store::{StoreState, TaskAction};
use crate::time::{Clock, SystemClock};

/// The operations surface a UI talks to.
///
/// Construct one per session. Mutations go through the reducer; reads run
/// the query engine against the current state on every call.
pub struct TaskBoard<C: Clock = SystemClock> {
    state: StoreState,
    clock: C,
    last_assigned_on: Option<DateTime<Utc>>,
}

impl TaskBoard<SystemClock> {
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for TaskBoard<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> TaskBoard<C> {
    pub fn with_clock(clock: C) -> Self {
        Self {
            state: StoreState::new(),
            clock,
            last_assigned_on: None,
        }
    }

    pub fn from_snapshot(snapshot: BoardSnapshot, clock: C) -> Self {
        let state = StoreState::from_snapshot(snapshot);
        let last_assigned_on = state.tasks.iter().map(|t| t.assigned_on).max();
        Self {
            state,
            clock,
            last_assigned_on,
        }
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        self.state.snapshot()
    }

    pub fn dispatch(&mut self, action: TaskAction) {
        self.state.apply(action);
    }

    /// Gives the draft a fresh id and creation time and appends it.
    pub fn add_task(&mut self, draft: TaskDraft) -> Uuid {
        let id = Uuid::new_v4();
        let assigned_on = self.next_assigned_on();
        debug!(%id, name = %draft.task_name, "adding task");
        self.dispatch(TaskAction::Add(draft.into_task(id, assigned_on)));
        id
    }

    pub fn edit_task(&mut self, task: Task) {
        self.dispatch(TaskAction::Edit(task));
    }

    pub fn delete_task(&mut self, id: &Uuid) {
        self.dispatch(TaskAction::Delete(*id));
    }

    pub fn toggle_task(&mut self, id: &Uuid) {
        self.dispatch(TaskAction::Toggle(*id));
    }

    pub fn set_filters(&mut self, filters: TaskFilters) {
        self.dispatch(TaskAction::SetFilters(filters));
    }

    pub fn reset_filters(&mut self) {
        self.dispatch(TaskAction::ResetFilters);
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.dispatch(TaskAction::SetSearchTerm(term.into()));
    }

    /// Tasks passing the active filters and search term, as of the clock's today.
    pub fn get_filtered_tasks(&self) -> Vec<&Task> {
        self.get_filtered_tasks_on(self.clock.today())
    }

    pub fn get_filtered_tasks_on(&self, today: NaiveDate) -> Vec<&Task> {
        filter_tasks(
            &self.state.tasks,
            &self.state.filters,
            &self.state.search_term,
            today,
        )
    }

    pub fn tasks(&self) -> &[Task] {
        &self.state.tasks
    }

    pub fn filters(&self) -> &TaskFilters {
        &self.state.filters
    }

    pub fn search_term(&self) -> &str {
        &self.state.search_term
    }

    pub fn find(&self, id: &Uuid) -> Option<&Task> {
        self.state.find(id)
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn state(&self) -> &StoreState {
        &self.state
    }

    // Sequential adds never go back in time, even if the wall clock does.
    fn next_assigned_on(&mut self) -> DateTime<Utc> {
        let now = self.clock.now();
        let assigned_on = match self.last_assigned_on {
            Some(last) if last > now => last,
            _ => now,
        };
        self.last_assigned_on = Some(assigned_on);
        assigned_on
    }
}
