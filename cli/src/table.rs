use chrono::NaiveDate;
use tabled::settings::object::Rows;
use tabled::settings::{Color, Modify, Style};
use tabled::{Table, Tabled};
use taskboard_core::{due_bucket, DueDateFilter, Task};

#[derive(Tabled)]
struct TaskRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Done")]
    done: &'static str,
    #[tabled(rename = "Priority")]
    priority: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Due")]
    due: String,
    #[tabled(rename = "Assignee")]
    assignee: String,
    #[tabled(rename = "Task")]
    name: String,
}

pub fn short_id(task: &Task) -> String {
    task.id.to_string()[..8].to_string()
}

fn due_label(task: &Task, today: NaiveDate, date_format: &str) -> String {
    match task.due_date {
        None => "-".to_string(),
        Some(date) => {
            let formatted = date.format(date_format).to_string();
            match due_bucket(task, today) {
                DueDateFilter::Overdue => format!("{formatted} (overdue)"),
                DueDateFilter::Today => format!("{formatted} (today)"),
                _ => formatted,
            }
        }
    }
}

pub fn render_tasks(tasks: &[&Task], today: NaiveDate, date_format: &str) -> String {
    let rows: Vec<TaskRow> = tasks
        .iter()
        .map(|task| TaskRow {
            id: short_id(task),
            done: if task.completed { "x" } else { "" },
            priority: task.priority.to_string(),
            category: task.category.to_string(),
            due: due_label(task, today, date_format),
            assignee: if task.assigned_user.is_empty() {
                "-".to_string()
            } else {
                task.assigned_user.clone()
            },
            name: task.task_name.clone(),
        })
        .collect();

    let mut table = Table::new(rows);
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Color::FG_CYAN));
    table.to_string()
}
