use async_trait::async_trait;
use kanban_core::KanbanResult;
use kanban_domain::{BoardSummary, Column, RemoteId, Task, TaskPatch};

/// Typed access to the board service.
///
/// Implementations attach credentials and classify failures into
/// `KanbanError` variants. They never retry; that decision belongs to the
/// caller.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BoardGateway: Send + Sync {
    // Boards
    async fn list_boards(&self) -> KanbanResult<Vec<BoardSummary>>;
    async fn create_board(&self, name: &str) -> KanbanResult<BoardSummary>;
    async fn delete_board(&self, board_id: RemoteId) -> KanbanResult<()>;

    // Columns
    /// Columns of a board, without their tasks.
    async fn get_columns(&self, board_id: RemoteId) -> KanbanResult<Vec<Column>>;
    async fn create_column(&self, board_id: RemoteId, title: &str) -> KanbanResult<Column>;
    async fn delete_column(&self, board_id: RemoteId, column_id: RemoteId) -> KanbanResult<()>;
    async fn move_column(
        &self,
        board_id: RemoteId,
        column_id: RemoteId,
        new_position: usize,
    ) -> KanbanResult<()>;

    // Tasks
    async fn get_tasks(&self, column_id: RemoteId) -> KanbanResult<Vec<Task>>;
    async fn create_task(
        &self,
        column_id: RemoteId,
        title: &str,
        description: &str,
    ) -> KanbanResult<Task>;
    async fn delete_task(&self, column_id: RemoteId, task_id: RemoteId) -> KanbanResult<()>;
    async fn move_task(
        &self,
        source_column_id: RemoteId,
        task_id: RemoteId,
        target_column_id: RemoteId,
        new_position: usize,
    ) -> KanbanResult<()>;
    async fn update_task(&self, task_id: RemoteId, patch: &TaskPatch) -> KanbanResult<()>;
}
