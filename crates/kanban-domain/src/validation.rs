use kanban_core::{KanbanError, KanbanResult};

/// Reject blank titles before anything is snapshotted or sent.
pub fn validate_title(title: &str, what: &str) -> KanbanResult<()> {
    if title.trim().is_empty() {
        return Err(KanbanError::Validation(format!("{} must not be empty", what)));
    }
    Ok(())
}
