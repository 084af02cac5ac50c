pub mod board;
pub mod error;
pub mod input;
pub mod model;
pub mod query;
pub mod repository;
pub mod store;
pub mod time;

#[cfg(test)]
mod board_test;

pub use board::TaskBoard;
pub use error::ParseError;
pub use input::{expand_key, parse_args, ParsedInput, TaskFields};
pub use model::filter::{DueDateFilter, StatusFilter, TaskFilters};
pub use model::snapshot::BoardSnapshot;
pub use model::task::{Category, Priority, Task, TaskDraft};
pub use query::{due_bucket, filter_tasks};
pub use repository::{FileTaskRepository, TaskRepository};
pub use store::{StoreState, TaskAction};
pub use time::{parse_due_date, Clock, FixedClock, SystemClock};
