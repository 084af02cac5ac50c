use serde::{Deserialize, Serialize};

use crate::model::filter::TaskFilters;
use crate::model::task::Task;

/// What a board hands to a repository at session boundaries.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct BoardSnapshot {
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub filters: TaskFilters,
}
