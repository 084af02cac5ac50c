use anyhow::Result;

use crate::model::snapshot::BoardSnapshot;

/// Load/save hooks a session wraps around a board.
pub trait TaskRepository {
    fn load(&self) -> Result<BoardSnapshot>;
    fn save(&self, snapshot: &BoardSnapshot) -> Result<()>;
}
