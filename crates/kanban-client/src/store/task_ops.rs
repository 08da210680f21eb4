use super::EntityStore;
use kanban_core::{KanbanError, KanbanResult};
use kanban_domain::{
    validate_title, BoardCommand, ColumnId, ReorderCommand, Task, TaskId, TaskPatch,
};

impl EntityStore {
    /// Append a task to a column, then create it on the service. New tasks
    /// always go to the end of the column.
    pub async fn create_task(
        &self,
        column_id: ColumnId,
        title: &str,
        description: Option<String>,
    ) -> KanbanResult<Task> {
        validate_title(title, "Task title")?;

        let (rollback, (remote_column_id, placeholder_id)) = self.apply_to_board(|board| {
            let remote_column_id = column_id.require_remote("Column")?;
            let column = board
                .column_mut(column_id)
                .ok_or_else(|| KanbanError::NotFound(format!("Column {}", column_id)))?;
            let placeholder = Task::placeholder(title.to_string(), description.clone(), 0);
            let placeholder_id = placeholder.id;
            column.push_task(placeholder);
            Ok((remote_column_id, placeholder_id))
        })?;
        tracing::debug!("Applied optimistically: create task '{}'", title);

        let created = self
            .confirm_board(
                "task creation",
                rollback,
                self.gateway.create_task(
                    remote_column_id,
                    title,
                    description.as_deref().unwrap_or(""),
                ),
            )
            .await?;

        let confirmed = created.clone();
        self.reconcile_board(|board| board.replace_task(placeholder_id, confirmed));
        Ok(created)
    }

    pub async fn delete_task(&self, column_id: ColumnId, task_id: TaskId) -> KanbanResult<()> {
        let (rollback, (remote_column_id, remote_task_id)) = self.apply_to_board(|board| {
            let remote_column_id = column_id.require_remote("Column")?;
            let remote_task_id = task_id.require_remote("Task")?;
            board
                .column_mut(column_id)
                .ok_or_else(|| KanbanError::NotFound(format!("Column {}", column_id)))?
                .remove_task(task_id)?;
            Ok((remote_column_id, remote_task_id))
        })?;
        tracing::debug!("Applied optimistically: delete task {}", task_id);

        self.confirm_board(
            "task deletion",
            rollback,
            self.gateway.delete_task(remote_column_id, remote_task_id),
        )
        .await
    }

    /// Move a task within a column or across columns. `dest_index` counts
    /// against the destination after the task has been detached.
    pub async fn move_task(
        &self,
        task_id: TaskId,
        source_column_id: ColumnId,
        dest_column_id: ColumnId,
        source_index: usize,
        dest_index: usize,
    ) -> KanbanResult<()> {
        let command = ReorderCommand::Task {
            task_id,
            source_column_id,
            dest_column_id,
            source_index,
            dest_index,
        };
        if command.is_noop() {
            return Ok(());
        }

        let (rollback, (remote_task_id, remote_source_id, remote_dest_id)) =
            self.apply_to_board(|board| {
                let remote_task_id = task_id.require_remote("Task")?;
                let remote_source_id = source_column_id.require_remote("Column")?;
                let remote_dest_id = dest_column_id.require_remote("Column")?;
                command.apply(board)?;
                Ok((remote_task_id, remote_source_id, remote_dest_id))
            })?;
        tracing::debug!("Applied optimistically: {}", command.description());

        self.confirm_board(
            "task movement",
            rollback,
            self.gateway
                .move_task(remote_source_id, remote_task_id, remote_dest_id, dest_index),
        )
        .await
    }

    /// Patch a task's title and/or description wherever it currently is.
    pub async fn update_task(&self, task_id: TaskId, patch: TaskPatch) -> KanbanResult<()> {
        patch.validate()?;
        if patch.is_empty() {
            return Ok(());
        }

        let (rollback, remote_task_id) = self.apply_to_board(|board| {
            let remote_task_id = task_id.require_remote("Task")?;
            board
                .task_mut(task_id)
                .ok_or_else(|| KanbanError::NotFound(format!("Task {}", task_id)))?
                .apply_patch(&patch);
            Ok(remote_task_id)
        })?;
        tracing::debug!("Applied optimistically: update task {}", task_id);

        self.confirm_board(
            "task details",
            rollback,
            self.gateway.update_task(remote_task_id, &patch),
        )
        .await
    }
}
