use thiserror::Error;

/// Errors raised while turning loose user input into task fields.
///
/// The store and query engine never fail; only the parsing edge does.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("unknown key: '{0}'")]
    UnknownKey(String),

    #[error("ambiguous key: '{key}' matches {candidates:?}")]
    AmbiguousKey { key: String, candidates: Vec<String> },

    #[error("invalid priority: '{0}' (expected low, medium or high)")]
    InvalidPriority(String),

    #[error("invalid category: '{0}' (expected frontend, backend, meeting, design or other)")]
    InvalidCategory(String),

    #[error("invalid status filter: '{0}' (expected all, completed or incomplete)")]
    InvalidStatus(String),

    #[error("invalid due filter: '{0}' (expected overdue, today, upcoming or none)")]
    InvalidDueFilter(String),

    #[error("could not parse date: '{0}'")]
    InvalidDate(String),
}
