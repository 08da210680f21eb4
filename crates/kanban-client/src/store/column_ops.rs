use super::EntityStore;
use kanban_core::KanbanResult;
use kanban_domain::{validate_title, BoardCommand, Column, ColumnId, ReorderCommand};

impl EntityStore {
    /// Append a column to the loaded board, then create it on the service.
    pub async fn create_column(&self, title: &str) -> KanbanResult<Column> {
        validate_title(title, "Column title")?;

        let (rollback, (board_id, placeholder_id)) = self.apply_to_board(|board| {
            let board_id = board.id.require_remote("Board")?;
            let placeholder = Column::placeholder(title.to_string(), 0);
            let placeholder_id = placeholder.id;
            board.push_column(placeholder);
            Ok((board_id, placeholder_id))
        })?;
        tracing::debug!("Applied optimistically: create column '{}'", title);

        let created = self
            .confirm_board(
                "column creation",
                rollback,
                self.gateway.create_column(board_id, title),
            )
            .await?;

        let confirmed = created.clone();
        self.reconcile_board(|board| board.replace_column(placeholder_id, confirmed));
        Ok(created)
    }

    pub async fn delete_column(&self, column_id: ColumnId) -> KanbanResult<()> {
        let (rollback, (board_id, remote_column_id)) = self.apply_to_board(|board| {
            let board_id = board.id.require_remote("Board")?;
            let remote_column_id = column_id.require_remote("Column")?;
            board.remove_column(column_id)?;
            Ok((board_id, remote_column_id))
        })?;
        tracing::debug!("Applied optimistically: delete column {}", column_id);

        self.confirm_board(
            "column deletion",
            rollback,
            self.gateway.delete_column(board_id, remote_column_id),
        )
        .await
    }

    /// Reorder a column. Dropping a column where it already is does
    /// nothing at all.
    pub async fn move_column(
        &self,
        column_id: ColumnId,
        source_index: usize,
        dest_index: usize,
    ) -> KanbanResult<()> {
        let command = ReorderCommand::Column {
            column_id,
            source_index,
            dest_index,
        };
        if command.is_noop() {
            return Ok(());
        }

        let (rollback, (board_id, remote_column_id)) = self.apply_to_board(|board| {
            let board_id = board.id.require_remote("Board")?;
            let remote_column_id = column_id.require_remote("Column")?;
            command.apply(board)?;
            Ok((board_id, remote_column_id))
        })?;
        tracing::debug!("Applied optimistically: {}", command.description());

        self.confirm_board(
            "column movement",
            rollback,
            self.gateway
                .move_column(board_id, remote_column_id, dest_index),
        )
        .await
    }
}
