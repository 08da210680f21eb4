use kanban_client::{DragEndEvent, DragKind, DragLocation, EntityStore, HttpGateway, Session};
use kanban_core::{ClientConfig, KanbanError, KanbanResult};
use kanban_domain::{Board, EntityId, RemoteId};
use std::path::Path;
use std::sync::Arc;

pub struct CliContext {
    session: Session,
}

impl CliContext {
    pub fn connect(
        config_path: Option<&Path>,
        api_url: Option<String>,
        token: Option<String>,
    ) -> KanbanResult<Self> {
        let config = match config_path {
            Some(path) => ClientConfig::load_from(path)?,
            None => ClientConfig::load(),
        }
        .with_overrides(api_url, token);

        tracing::debug!("Using board service at {}", config.effective_api_url());
        let gateway = HttpGateway::from_config(&config);
        Ok(Self {
            session: Session::new(Arc::new(gateway)),
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn store(&self) -> &EntityStore {
        self.session.store()
    }

    /// Load the board list, then one board with all of its columns and tasks.
    pub async fn open_board(&self, board_id: RemoteId) -> KanbanResult<Arc<Board>> {
        let store = self.store();
        store.fetch_boards().await?;
        store.fetch_board_details(EntityId::Remote(board_id)).await?;
        store
            .current_board()
            .ok_or_else(|| KanbanError::Internal(format!("Board {} did not load", board_id)))
    }

    /// Report a failed mutation through its rollback notice when there is one.
    pub fn explain(&self, error: KanbanError) -> anyhow::Error {
        match self.store().take_notices().pop() {
            Some(notice) => anyhow::anyhow!(notice.message),
            None => error.into(),
        }
    }
}

/// The drop a user would make to put a column at `position`.
pub fn column_drag(
    board: &Board,
    column_id: RemoteId,
    position: usize,
) -> KanbanResult<DragEndEvent> {
    let id = EntityId::Remote(column_id);
    let index = board
        .column_index(id)
        .ok_or_else(|| KanbanError::NotFound(format!("Column {}", id)))?;
    let container = board.id.to_string();

    Ok(DragEndEvent {
        draggable_id: id.to_string(),
        kind: DragKind::Column,
        source: DragLocation::new(container.clone(), index),
        destination: Some(DragLocation::new(container, position)),
    })
}

/// The drop a user would make to put a task at `position` of a column. Without
/// a destination column the task stays in its own.
pub fn task_drag(
    board: &Board,
    task_id: RemoteId,
    dest_column_id: Option<RemoteId>,
    position: usize,
) -> KanbanResult<DragEndEvent> {
    let id = EntityId::Remote(task_id);
    let (ci, ti) = board
        .task_location(id)
        .ok_or_else(|| KanbanError::NotFound(format!("Task {}", id)))?;
    let source_column = board.columns[ci].id;
    let dest_column = dest_column_id.map(EntityId::Remote).unwrap_or(source_column);

    Ok(DragEndEvent {
        draggable_id: id.to_string(),
        kind: DragKind::Task,
        source: DragLocation::new(source_column.to_string(), ti),
        destination: Some(DragLocation::new(dest_column.to_string(), position)),
    })
}
