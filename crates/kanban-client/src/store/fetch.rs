use super::EntityStore;
use futures::future::try_join_all;
use kanban_core::{KanbanError, KanbanResult};
use kanban_domain::{Board, BoardId, Column, RemoteId};
use std::sync::Arc;

impl EntityStore {
    /// Load the user's board list.
    pub async fn fetch_boards(&self) -> KanbanResult<()> {
        {
            let mut state = self.state.lock();
            state.is_loading = true;
            state.error = None;
        }

        let result = self.gateway.list_boards().await;

        let mut state = self.state.lock();
        state.is_loading = false;
        match result {
            Ok(boards) => {
                tracing::info!("Loaded {} boards", boards.len());
                state.boards = Arc::new(boards);
                Ok(())
            }
            Err(e) => {
                tracing::warn!("Failed to load boards: {}", e);
                state.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Materialize a board: its columns, then every column's tasks
    /// concurrently. Replaces whatever board was loaded before. On failure
    /// the previously loaded board stays as it was.
    pub async fn fetch_board_details(&self, board_id: BoardId) -> KanbanResult<()> {
        let remote_id = board_id.require_remote("Board")?;

        let seq = {
            let mut state = self.state.lock();
            state.load_seq += 1;
            state.is_loading = true;
            state.error = None;
            state.load_seq
        };

        let result = self.load_columns(remote_id).await;

        let mut state = self.state.lock();
        if state.load_seq != seq {
            tracing::debug!("Discarding superseded load of board {}", board_id);
            return result.map(|_| ());
        }
        state.is_loading = false;

        match result {
            Ok(columns) => {
                let mut board = match state.boards.iter().find(|b| b.id == board_id) {
                    Some(summary) => Board::from_summary(summary, columns),
                    None => Board::new(board_id, String::new(), columns),
                };
                board.sort_columns_by_position();
                tracing::info!(
                    "Loaded board {} with {} columns",
                    board_id,
                    board.columns.len()
                );
                state.current_board = Some(Arc::new(board));
                state.board_seq = seq;
                Ok(())
            }
            Err(e) => {
                tracing::warn!("Failed to load board {}: {}", board_id, e);
                state.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    async fn load_columns(&self, board_id: RemoteId) -> KanbanResult<Vec<Column>> {
        let columns = self.gateway.get_columns(board_id).await?;
        let gateway = &self.gateway;

        try_join_all(columns.into_iter().map(|mut column| async move {
            let column_id = column.id.require_remote("Column")?;
            column.tasks = gateway.get_tasks(column_id).await?;
            Ok::<_, KanbanError>(column)
        }))
        .await
    }
}
