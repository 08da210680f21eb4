//! Order-preserving list operations shared by columns and tasks.
//!
//! Sequence order is the only source of truth for display order. The
//! `position` field is kept equal to the array index after every
//! structural change so it stays meaningful to the service.

use kanban_core::{KanbanError, KanbanResult};

pub trait Positioned {
    fn position(&self) -> i32;
    fn set_position(&mut self, position: i32);
}

/// Set every element's position to its index (dense, 0-based).
pub fn reindex<T: Positioned>(items: &mut [T]) {
    for (index, item) in items.iter_mut().enumerate() {
        item.set_position(index as i32);
    }
}

/// Check that `to` is a valid insertion point once one element has been
/// removed from a list of `len` elements.
pub fn check_insert_index(len_after_removal: usize, to: usize) -> KanbanResult<()> {
    if to > len_after_removal {
        return Err(KanbanError::Validation(format!(
            "Destination index {} out of range (len {})",
            to, len_after_removal
        )));
    }
    Ok(())
}

/// Splice-style move within one list: remove at `from`, then insert at
/// `to` counted against the list after removal.
pub fn move_item<T>(items: &mut Vec<T>, from: usize, to: usize) -> KanbanResult<()> {
    if from >= items.len() {
        return Err(KanbanError::Validation(format!(
            "Source index {} out of range (len {})",
            from,
            items.len()
        )));
    }
    check_insert_index(items.len() - 1, to)?;

    let item = items.remove(from);
    items.insert(to, item);
    Ok(())
}
