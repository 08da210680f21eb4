use crate::Board;
use kanban_core::KanbanResult;

pub mod reorder;

pub use reorder::ReorderCommand;

/// A structural change to a materialized board.
/// Commands are applied to a working copy; the caller decides whether the
/// result becomes visible.
pub trait BoardCommand: Send + Sync {
    /// Apply this command to `board`. On error the board is left unchanged.
    fn apply(&self, board: &mut Board) -> KanbanResult<()>;

    /// Human-readable description of what this command does
    fn description(&self) -> String;
}
