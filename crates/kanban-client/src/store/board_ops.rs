use super::EntityStore;
use kanban_core::{KanbanError, KanbanResult};
use kanban_domain::{validate_title, BoardId, BoardSummary};
use std::sync::Arc;

impl EntityStore {
    /// Append a board to the list right away, then create it on the
    /// service and swap the placeholder for the confirmed entry.
    pub async fn create_board(&self, name: &str) -> KanbanResult<BoardSummary> {
        validate_title(name, "Board name")?;

        let placeholder = BoardSummary::placeholder(name.to_string());
        let placeholder_id = placeholder.id;
        let (rollback, ()) = self.apply_to_boards(|boards| {
            boards.push(placeholder);
            Ok(())
        })?;
        tracing::debug!("Applied optimistically: create board '{}'", name);

        let created = self
            .confirm_boards("board creation", rollback, self.gateway.create_board(name))
            .await?;

        let mut state = self.state.lock();
        if let Some(index) = state.boards.iter().position(|b| b.id == placeholder_id) {
            let mut boards = (*state.boards).clone();
            boards[index] = created.clone();
            state.boards = Arc::new(boards);
        }
        Ok(created)
    }

    pub async fn delete_board(&self, board_id: BoardId) -> KanbanResult<()> {
        let remote_id = board_id.require_remote("Board")?;

        let (rollback, ()) = self.apply_to_boards(|boards| {
            let index = boards
                .iter()
                .position(|b| b.id == board_id)
                .ok_or_else(|| KanbanError::NotFound(format!("Board {}", board_id)))?;
            boards.remove(index);
            Ok(())
        })?;
        tracing::debug!("Applied optimistically: delete board {}", board_id);

        self.confirm_boards("board deletion", rollback, self.gateway.delete_board(remote_id))
            .await
    }
}
