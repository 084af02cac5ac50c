use chrono::NaiveDate;

use crate::error::ParseError;
use crate::model::task::{Category, Priority, Task, TaskDraft};
use crate::time::parse_due_date;

pub const KNOWN_KEYS: [&str; 4] = ["priority", "category", "due", "user"];

#[derive(Debug, PartialEq)]
pub struct ParsedInput {
    pub name: String,
    /// `(expanded key, value)` pairs in argument order.
    pub metadata: Vec<(String, String)>,
}

/// Splits `key:value` tokens from the words of a task name.
///
/// Only tokens whose key expands to one of [`KNOWN_KEYS`] count as metadata;
/// `10:30` or `https://..` stay part of the name.
pub fn parse_args(args: &[String]) -> ParsedInput {
    let mut name_parts = Vec::new();
    let mut metadata = Vec::new();

    for arg in args {
        if let Some((key, value)) = arg.split_once(':') {
            if !key.is_empty() {
                if let Ok(key) = expand_key(&key.to_lowercase(), &KNOWN_KEYS) {
                    metadata.push((key, value.to_string()));
                    continue;
                }
            }
        }
        name_parts.push(arg.as_str());
    }

    ParsedInput {
        name: name_parts.join(" "),
        metadata,
    }
}

pub fn expand_key(key: &str, candidates: &[&str]) -> Result<String, ParseError> {
    // 1. Exact match
    if candidates.contains(&key) {
        return Ok(key.to_string());
    }

    // 2. Prefix match
    let matches: Vec<&str> = candidates
        .iter()
        .filter(|&&c| c.starts_with(key))
        .copied()
        .collect();

    match matches.as_slice() {
        [only] => Ok(only.to_string()),
        [] => Err(ParseError::UnknownKey(key.to_string())),
        _ => Err(ParseError::AmbiguousKey {
            key: key.to_string(),
            candidates: matches.iter().map(|m| m.to_string()).collect(),
        }),
    }
}

/// Task fields named by metadata. `None` means the key was not given.
#[derive(Debug, Default, PartialEq)]
pub struct TaskFields {
    pub priority: Option<Priority>,
    pub category: Option<Category>,
    // Some(None) clears the due date
    pub due_date: Option<Option<NaiveDate>>,
    pub assigned_user: Option<String>,
}

impl TaskFields {
    /// Later pairs override earlier ones for the same key.
    pub fn from_metadata(
        metadata: &[(String, String)],
        today: NaiveDate,
    ) -> Result<Self, ParseError> {
        let mut fields = TaskFields::default();

        for (key, value) in metadata {
            match expand_key(key, &KNOWN_KEYS)?.as_str() {
                "priority" => fields.priority = Some(value.parse()?),
                "category" => fields.category = Some(value.parse()?),
                "due" => {
                    fields.due_date = match value.trim() {
                        "" | "-" | "none" => Some(None),
                        expr => Some(Some(parse_due_date(expr, today)?)),
                    }
                }
                "user" => fields.assigned_user = Some(value.clone()),
                _ => {}
            }
        }

        Ok(fields)
    }

    /// Builds a draft, falling back to Medium priority and the Other category.
    pub fn into_draft(self, name: impl Into<String>) -> TaskDraft {
        TaskDraft {
            task_name: name.into(),
            priority: self.priority.unwrap_or_default(),
            category: self.category.unwrap_or_default(),
            due_date: self.due_date.flatten(),
            assigned_user: self.assigned_user.unwrap_or_default(),
            completed: false,
        }
    }

    pub fn apply_to(self, task: &mut Task) {
        if let Some(priority) = self.priority {
            task.priority = priority;
        }
        if let Some(category) = self.category {
            task.category = category;
        }
        if let Some(due_date) = self.due_date {
            task.due_date = due_date;
        }
        if let Some(user) = self.assigned_user {
            task.assigned_user = user;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 15).unwrap()
    }

    fn args(words: &[&str]) -> Vec<String> {
        words.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_simple() {
        let parsed = parse_args(&args(&["Fix", "login", "due:tomorrow", "cat:Frontend"]));
        assert_eq!(parsed.name, "Fix login");
        assert_eq!(
            parsed.metadata,
            vec![
                ("due".to_string(), "tomorrow".to_string()),
                ("category".to_string(), "Frontend".to_string()),
            ]
        );
    }

    #[test]
    fn test_colon_words_with_unknown_keys_stay_in_name() {
        let parsed = parse_args(&args(&["Call", "at", "10:30"]));
        assert_eq!(parsed.name, "Call at 10:30");
        assert!(parsed.metadata.is_empty());

        let parsed = parse_args(&args(&["Read", "https://x.io", "pri:h"]));
        assert_eq!(parsed.name, "Read https://x.io");
        let fields = TaskFields::from_metadata(&parsed.metadata, today()).unwrap();
        assert_eq!(fields.priority, Some(Priority::High));
    }

    #[test]
    fn test_repeated_key_last_one_wins() {
        let parsed = parse_args(&args(&["x", "pri:h", "p:l"]));
        let fields = TaskFields::from_metadata(&parsed.metadata, today()).unwrap();
        assert_eq!(fields.priority, Some(Priority::Low));

        let parsed = parse_args(&args(&["x", "p:l", "pri:h"]));
        let fields = TaskFields::from_metadata(&parsed.metadata, today()).unwrap();
        assert_eq!(fields.priority, Some(Priority::High));
    }

    #[test]
    fn test_leading_colon_stays_in_name() {
        let parsed = parse_args(&args(&["ratio", ":3"]));
        assert_eq!(parsed.name, "ratio :3");
        assert!(parsed.metadata.is_empty());
    }

    #[test]
    fn test_expand_key() {
        let candidates = ["due", "description", "priority"];

        assert_eq!(expand_key("du", &candidates).unwrap(), "due");
        assert_eq!(expand_key("due", &candidates).unwrap(), "due");
        assert_eq!(expand_key("p", &candidates).unwrap(), "priority");

        assert!(matches!(
            expand_key("d", &candidates),
            Err(ParseError::AmbiguousKey { .. })
        ));
        assert_eq!(expand_key("x", &candidates), Err(ParseError::UnknownKey("x".into())));
    }

    #[test]
    fn test_fields_into_draft() {
        let parsed = parse_args(&args(&["Plan", "sprint", "p:h", "c:mtg", "d:tom", "u:Erin"]));
        let draft = TaskFields::from_metadata(&parsed.metadata, today())
            .unwrap()
            .into_draft(parsed.name);

        assert_eq!(draft.task_name, "Plan sprint");
        assert_eq!(draft.priority, Priority::High);
        assert_eq!(draft.category, Category::Meeting);
        assert_eq!(draft.due_date, NaiveDate::from_ymd_opt(2025, 1, 16));
        assert_eq!(draft.assigned_user, "Erin");
        assert!(!draft.completed);
    }

    #[test]
    fn test_defaults_when_metadata_missing() {
        let draft = TaskFields::default().into_draft("bare");
        assert_eq!(draft.priority, Priority::Medium);
        assert_eq!(draft.category, Category::Other);
        assert!(draft.due_date.is_none());
    }

    #[test]
    fn test_bad_values_are_errors() {
        let parsed = parse_args(&args(&["x", "pri:urgent"]));
        assert_eq!(
            TaskFields::from_metadata(&parsed.metadata, today()),
            Err(ParseError::InvalidPriority("urgent".into()))
        );

        let parsed = parse_args(&args(&["x", "due:someday"]));
        assert!(TaskFields::from_metadata(&parsed.metadata, today()).is_err());
    }

    #[test]
    fn test_apply_to_task_and_clear_due() {
        let mut task = TaskFields::default()
            .into_draft("t")
            .due(today())
            .into_task(Uuid::new_v4(), Utc::now());
        let parsed = parse_args(&args(&["due:none", "category:design"]));
        TaskFields::from_metadata(&parsed.metadata, today())
            .unwrap()
            .apply_to(&mut task);

        assert!(task.due_date.is_none());
        assert_eq!(task.category, Category::Design);
        assert_eq!(task.priority, Priority::Medium);
    }
}
