use super::BoardCommand;
use crate::{Board, ColumnId, TaskId};
use kanban_core::KanbanResult;

/// A normalized drag-and-drop result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReorderCommand {
    Column {
        column_id: ColumnId,
        source_index: usize,
        dest_index: usize,
    },
    Task {
        task_id: TaskId,
        source_column_id: ColumnId,
        dest_column_id: ColumnId,
        source_index: usize,
        dest_index: usize,
    },
}

impl ReorderCommand {
    /// Same container and same index: nothing would change.
    pub fn is_noop(&self) -> bool {
        match self {
            ReorderCommand::Column {
                source_index,
                dest_index,
                ..
            } => source_index == dest_index,
            ReorderCommand::Task {
                source_column_id,
                dest_column_id,
                source_index,
                dest_index,
                ..
            } => source_column_id == dest_column_id && source_index == dest_index,
        }
    }
}

impl BoardCommand for ReorderCommand {
    fn apply(&self, board: &mut Board) -> KanbanResult<()> {
        match *self {
            ReorderCommand::Column {
                column_id,
                source_index,
                dest_index,
            } => board.move_column(column_id, source_index, dest_index),
            ReorderCommand::Task {
                task_id,
                source_column_id,
                dest_column_id,
                source_index,
                dest_index,
            } => board.move_task(
                task_id,
                source_column_id,
                dest_column_id,
                source_index,
                dest_index,
            ),
        }
    }

    fn description(&self) -> String {
        match self {
            ReorderCommand::Column {
                column_id,
                source_index,
                dest_index,
            } => format!(
                "Move column {} from {} to {}",
                column_id, source_index, dest_index
            ),
            ReorderCommand::Task {
                task_id,
                source_column_id,
                dest_column_id,
                dest_index,
                ..
            } => format!(
                "Move task {} from column {} to column {} at {}",
                task_id, source_column_id, dest_column_id, dest_index
            ),
        }
    }
}
