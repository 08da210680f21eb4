use crate::gateway::BoardGateway;
use crate::gesture::{self, DragEndEvent};
use crate::store::EntityStore;
use kanban_core::{FocusState, KanbanResult};
use kanban_domain::{Task, TaskId};
use parking_lot::Mutex;
use std::sync::Arc;

/// Everything one signed-in user works with: the board store and the task
/// that is open for editing. Created at sign-in, consumed by `logout`.
pub struct Session {
    store: Arc<EntityStore>,
    focus: Mutex<FocusState<TaskId>>,
}

impl Session {
    pub fn new(gateway: Arc<dyn BoardGateway>) -> Self {
        Self {
            store: Arc::new(EntityStore::new(gateway)),
            focus: Mutex::new(FocusState::new()),
        }
    }

    pub fn store(&self) -> &Arc<EntityStore> {
        &self.store
    }

    pub fn open_task(&self, task_id: TaskId) {
        self.focus.lock().open(task_id);
    }

    pub fn close_task(&self) {
        self.focus.lock().close();
    }

    pub fn is_detail_open(&self) -> bool {
        self.focus.lock().is_open()
    }

    /// The open task as it is on the board right now, including optimistic
    /// edits and rollbacks. `None` if nothing is open or the task is gone.
    pub fn focused_task(&self) -> Option<Task> {
        let task_id = *self.focus.lock().selected()?;
        let board = self.store.current_board()?;
        board.find_task(task_id).cloned()
    }

    /// Returns whether the drop produced a move.
    pub async fn handle_drag_end(&self, event: &DragEndEvent) -> KanbanResult<bool> {
        match gesture::normalize(event)? {
            Some(command) => {
                gesture::dispatch(&self.store, command).await?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn logout(self) {
        self.focus.lock().close();
        self.store.reset();
        tracing::info!("Session ended");
    }
}
