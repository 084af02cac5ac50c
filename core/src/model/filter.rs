use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseError;
use crate::model::task::{Category, Priority};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Completed,
    Incomplete,
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StatusFilter::All => "All",
            StatusFilter::Completed => "Completed",
            StatusFilter::Incomplete => "Incomplete",
        };
        f.write_str(s)
    }
}

impl FromStr for StatusFilter {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "a" | "all" => Ok(StatusFilter::All),
            "c" | "done" | "completed" => Ok(StatusFilter::Completed),
            "i" | "open" | "incomplete" => Ok(StatusFilter::Incomplete),
            _ => Err(ParseError::InvalidStatus(s.to_string())),
        }
    }
}

/// Relative due-date bucket, measured against a calendar day.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DueDateFilter {
    Overdue,
    Today,
    Upcoming,
    #[serde(rename = "No Due Date")]
    NoDueDate,
}

impl DueDateFilter {
    pub const ALL: [DueDateFilter; 4] = [
        DueDateFilter::Overdue,
        DueDateFilter::Today,
        DueDateFilter::Upcoming,
        DueDateFilter::NoDueDate,
    ];
}

impl fmt::Display for DueDateFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DueDateFilter::Overdue => "Overdue",
            DueDateFilter::Today => "Today",
            DueDateFilter::Upcoming => "Upcoming",
            DueDateFilter::NoDueDate => "No Due Date",
        };
        f.write_str(s)
    }
}

impl FromStr for DueDateFilter {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "overdue" | "late" => Ok(DueDateFilter::Overdue),
            "today" | "tod" => Ok(DueDateFilter::Today),
            "upcoming" | "later" => Ok(DueDateFilter::Upcoming),
            "none" | "no due date" | "no-due-date" | "nodue" => Ok(DueDateFilter::NoDueDate),
            _ => Err(ParseError::InvalidDueFilter(s.to_string())),
        }
    }
}

/// The active view criteria.
///
/// `None` and the empty string mean "no constraint" for their field.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct TaskFilters {
    #[serde(default)]
    pub status: StatusFilter,
    #[serde(default)]
    pub priority: Option<Priority>,
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub due_date: Option<DueDateFilter>,
    #[serde(default)]
    pub assigned_user: String,
}

impl TaskFilters {
    /// Number of fields currently narrowing the view.
    pub fn active_count(&self) -> usize {
        [
            self.status != StatusFilter::All,
            self.priority.is_some(),
            self.category.is_some(),
            self.due_date.is_some(),
            !self.assigned_user.is_empty(),
        ]
        .into_iter()
        .filter(|active| *active)
        .count()
    }

    pub fn is_default(&self) -> bool {
        self.active_count() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_has_no_active_criteria() {
        let filters = TaskFilters::default();
        assert_eq!(filters.status, StatusFilter::All);
        assert_eq!(filters.active_count(), 0);
        assert!(filters.is_default());
    }

    #[test]
    fn test_active_count() {
        let filters = TaskFilters {
            status: StatusFilter::Incomplete,
            priority: Some(Priority::High),
            assigned_user: "bo".to_string(),
            ..Default::default()
        };
        assert_eq!(filters.active_count(), 3);
        assert!(!filters.is_default());
    }

    #[test]
    fn test_due_filter_serializes_with_spaces() {
        let json = serde_json::to_string(&DueDateFilter::NoDueDate).unwrap();
        assert_eq!(json, "\"No Due Date\"");
        let back: DueDateFilter = serde_json::from_str(&json).unwrap();
        assert_eq!(back, DueDateFilter::NoDueDate);
    }

    #[test]
    fn test_parse_filters() {
        assert_eq!("done".parse::<StatusFilter>().unwrap(), StatusFilter::Completed);
        assert_eq!("Incomplete".parse::<StatusFilter>().unwrap(), StatusFilter::Incomplete);
        assert_eq!("none".parse::<DueDateFilter>().unwrap(), DueDateFilter::NoDueDate);
        assert_eq!("No Due Date".parse::<DueDateFilter>().unwrap(), DueDateFilter::NoDueDate);
        assert!("soon".parse::<DueDateFilter>().is_err());
    }

    #[test]
    fn test_missing_fields_deserialize_to_defaults() {
        let filters: TaskFilters = serde_json::from_str(r#"{"priority":"Low"}"#).unwrap();
        assert_eq!(filters.priority, Some(Priority::Low));
        assert_eq!(filters.status, StatusFilter::All);
        assert_eq!(filters.assigned_user, "");
    }
}
