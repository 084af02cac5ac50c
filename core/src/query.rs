//! Read-side view over the task collection.
//!
//! Every function here is pure: the caller supplies the calendar day used
//! for due-date buckets, so the same inputs always give the same output.

use chrono::NaiveDate;
use tracing::trace;

use crate::model::filter::{DueDateFilter, StatusFilter, TaskFilters};
use crate::model::task::Task;

/// Which due-date bucket `task` falls in on `today`.
pub fn due_bucket(task: &Task, today: NaiveDate) -> DueDateFilter {
    match task.due_date {
        None => DueDateFilter::NoDueDate,
        Some(due) if due < today => DueDateFilter::Overdue,
        Some(due) if due == today => DueDateFilter::Today,
        Some(_) => DueDateFilter::Upcoming,
    }
}

pub fn matches_status(task: &Task, status: StatusFilter) -> bool {
    match status {
        StatusFilter::All => true,
        StatusFilter::Completed => task.completed,
        StatusFilter::Incomplete => !task.completed,
    }
}

pub fn matches_priority(task: &Task, filters: &TaskFilters) -> bool {
    filters.priority.is_none_or(|p| task.priority == p)
}

pub fn matches_category(task: &Task, filters: &TaskFilters) -> bool {
    filters.category.is_none_or(|c| task.category == c)
}

pub fn matches_assignee(task: &Task, filters: &TaskFilters) -> bool {
    contains_ignore_case(&task.assigned_user, &filters.assigned_user)
}

/// A task without a due date only passes when the filter is unset or is
/// `NoDueDate` itself.
pub fn matches_due_date(task: &Task, filters: &TaskFilters, today: NaiveDate) -> bool {
    filters
        .due_date
        .is_none_or(|wanted| due_bucket(task, today) == wanted)
}

/// Free-text search looks at the task name only.
pub fn matches_search(task: &Task, search_term: &str) -> bool {
    contains_ignore_case(&task.task_name, search_term)
}

/// True when `task` satisfies every active clause plus the search term.
pub fn matches(task: &Task, filters: &TaskFilters, search_term: &str, today: NaiveDate) -> bool {
    matches_status(task, filters.status)
        && matches_priority(task, filters)
        && matches_category(task, filters)
        && matches_assignee(task, filters)
        && matches_due_date(task, filters, today)
        && matches_search(task, search_term)
}

/// The visible subset of `tasks`, in collection order.
pub fn filter_tasks<'a>(
    tasks: &'a [Task],
    filters: &TaskFilters,
    search_term: &str,
    today: NaiveDate,
) -> Vec<&'a Task> {
    let visible: Vec<&Task> = tasks
        .iter()
        .filter(|t| matches(t, filters, search_term, today))
        .collect();
    trace!(total = tasks.len(), visible = visible.len(), "filtered tasks");
    visible
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    needle.is_empty() || haystack.to_lowercase().contains(&needle.to_lowercase())
}
