use crate::error::KanbanError;

/// Result of every fallible board-client operation.
pub type KanbanResult<T> = Result<T, KanbanError>;
