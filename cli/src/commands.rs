use anyhow::{anyhow, bail, Result};
use clap::Args;
use taskboard_core::{
    parse_args, Category, Clock, DueDateFilter, Priority, StatusFilter, TaskBoard, TaskFields,
    TaskFilters,
};
use tracing::info;
use uuid::Uuid;

const ANY: &str = "any";

/// Filter flags shared by `list` and `filter set`. `any` clears a field.
#[derive(Args, Debug, Default, Clone)]
pub struct FilterArgs {
    /// all, completed or incomplete
    #[arg(long, short)]
    pub status: Option<StatusFilter>,
    /// low, medium, high or any
    #[arg(long, short)]
    pub priority: Option<String>,
    /// frontend, backend, meeting, design, other or any
    #[arg(long, short)]
    pub category: Option<String>,
    /// overdue, today, upcoming, none or any
    #[arg(long, short)]
    pub due: Option<String>,
    /// Case-insensitive substring of the assignee; empty clears
    #[arg(long, short)]
    pub user: Option<String>,
}

impl FilterArgs {
    /// Merges the given flags over `filters`, leaving the rest untouched.
    pub fn merge_into(&self, mut filters: TaskFilters) -> Result<TaskFilters> {
        if let Some(status) = self.status {
            filters.status = status;
        }
        if let Some(p) = &self.priority {
            filters.priority = parse_criterion::<Priority>(p)?;
        }
        if let Some(c) = &self.category {
            filters.category = parse_criterion::<Category>(c)?;
        }
        if let Some(d) = &self.due {
            filters.due_date = parse_criterion::<DueDateFilter>(d)?;
        }
        if let Some(u) = &self.user {
            filters.assigned_user = u.clone();
        }
        Ok(filters)
    }
}

fn parse_criterion<T>(value: &str) -> Result<Option<T>>
where
    T: std::str::FromStr<Err = taskboard_core::ParseError>,
{
    if value.is_empty() || value.eq_ignore_ascii_case(ANY) {
        return Ok(None);
    }
    Ok(Some(value.parse()?))
}

/// Finds the single task whose id starts with `prefix`.
pub fn resolve_id<C: Clock>(board: &TaskBoard<C>, prefix: &str) -> Result<Uuid> {
    let prefix = prefix.trim().to_lowercase();
    if prefix.is_empty() {
        bail!("Task id is required");
    }

    let matches: Vec<Uuid> = board
        .tasks()
        .iter()
        .filter(|t| t.id.to_string().starts_with(&prefix))
        .map(|t| t.id)
        .collect();

    match matches.as_slice() {
        [id] => Ok(*id),
        [] => Err(anyhow!("No task matches '{}'", prefix)),
        _ => Err(anyhow!("Ambiguous id '{}' matches {} tasks", prefix, matches.len())),
    }
}

pub fn add<C: Clock>(board: &mut TaskBoard<C>, args: &[String]) -> Result<Uuid> {
    let parsed = parse_args(args);
    if parsed.name.trim().is_empty() {
        bail!("Task name is required");
    }
    let fields = TaskFields::from_metadata(&parsed.metadata, board.today())?;
    let id = board.add_task(fields.into_draft(parsed.name));
    info!(%id, "task added from command line");
    Ok(id)
}

pub fn edit<C: Clock>(board: &mut TaskBoard<C>, prefix: &str, args: &[String]) -> Result<Uuid> {
    let id = resolve_id(board, prefix)?;
    let mut task = board
        .find(&id)
        .cloned()
        .ok_or_else(|| anyhow!("No task matches '{}'", prefix))?;

    let parsed = parse_args(args);
    if !parsed.name.trim().is_empty() {
        task.task_name = parsed.name;
    }
    TaskFields::from_metadata(&parsed.metadata, board.today())?.apply_to(&mut task);

    board.edit_task(task);
    Ok(id)
}

pub fn delete<C: Clock>(board: &mut TaskBoard<C>, prefix: &str) -> Result<Uuid> {
    let id = resolve_id(board, prefix)?;
    board.delete_task(&id);
    Ok(id)
}

pub fn toggle<C: Clock>(board: &mut TaskBoard<C>, prefix: &str) -> Result<bool> {
    let id = resolve_id(board, prefix)?;
    board.toggle_task(&id);
    Ok(board.find(&id).is_some_and(|t| t.completed))
}

/// One-line summary of the criteria in force.
pub fn describe_filters(filters: &TaskFilters, search_term: &str) -> String {
    let mut parts = vec![format!("status: {}", filters.status)];
    if let Some(p) = filters.priority {
        parts.push(format!("priority: {p}"));
    }
    if let Some(c) = filters.category {
        parts.push(format!("category: {c}"));
    }
    if let Some(d) = filters.due_date {
        parts.push(format!("due: {d}"));
    }
    if !filters.assigned_user.is_empty() {
        parts.push(format!("user: {}", filters.assigned_user));
    }
    if !search_term.is_empty() {
        parts.push(format!("search: \"{search_term}\""));
    }
    parts.join(" | ")
}
