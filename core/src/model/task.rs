use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ParseError;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
        };
        f.write_str(s)
    }
}

impl FromStr for Priority {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "l" | "lo" | "low" => Ok(Priority::Low),
            "m" | "med" | "medium" => Ok(Priority::Medium),
            "h" | "hi" | "high" => Ok(Priority::High),
            _ => Err(ParseError::InvalidPriority(s.to_string())),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Category {
    Frontend,
    Backend,
    Meeting,
    Design,
    #[default]
    Other,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Frontend,
        Category::Backend,
        Category::Meeting,
        Category::Design,
        Category::Other,
    ];
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Category::Frontend => "Frontend",
            Category::Backend => "Backend",
            Category::Meeting => "Meeting",
            Category::Design => "Design",
            Category::Other => "Other",
        };
        f.write_str(s)
    }
}

impl FromStr for Category {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "f" | "fe" | "front" | "frontend" => Ok(Category::Frontend),
            "b" | "be" | "back" | "backend" => Ok(Category::Backend),
            "m" | "mtg" | "meet" | "meeting" => Ok(Category::Meeting),
            "d" | "des" | "design" => Ok(Category::Design),
            "o" | "other" => Ok(Category::Other),
            _ => Err(ParseError::InvalidCategory(s.to_string())),
        }
    }
}

/// A unit of work held by the board.
///
/// `id` and `assigned_on` are fixed at creation. `completed` only changes
/// through a toggle.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: Uuid,
    pub task_name: String,
    pub priority: Priority,
    pub category: Category,
    // Calendar date only; absence is distinct from every date.
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub assigned_user: String,
    pub assigned_on: DateTime<Utc>,
    #[serde(default)]
    pub completed: bool,
}

/// A task as submitted by a caller, before it has an identity.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TaskDraft {
    pub task_name: String,
    pub priority: Priority,
    pub category: Category,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub assigned_user: String,
    #[serde(default)]
    pub completed: bool,
}

impl TaskDraft {
    pub fn new(task_name: impl Into<String>, priority: Priority, category: Category) -> Self {
        Self {
            task_name: task_name.into(),
            priority,
            category,
            due_date: None,
            assigned_user: String::new(),
            completed: false,
        }
    }

    pub fn due(mut self, date: NaiveDate) -> Self {
        self.due_date = Some(date);
        self
    }

    pub fn assigned_to(mut self, user: impl Into<String>) -> Self {
        self.assigned_user = user.into();
        self
    }

    pub fn completed(mut self, completed: bool) -> Self {
        self.completed = completed;
        self
    }

    pub fn into_task(self, id: Uuid, assigned_on: DateTime<Utc>) -> Task {
        Task {
            id,
            task_name: self.task_name,
            priority: self.priority,
            category: self.category,
            due_date: self.due_date,
            assigned_user: self.assigned_user,
            assigned_on,
            completed: self.completed,
        }
    }
}
