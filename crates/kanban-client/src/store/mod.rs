//! Client-side copy of the board graph.
//!
//! Every mutation follows the same shape:
//!
//! 1. validate locally (nothing is captured or sent on failure),
//! 2. keep the current value as the rollback target,
//! 3. publish a modified copy so readers see the result immediately,
//! 4. call the gateway,
//! 5. on failure put the rollback target back and queue a [`Notice`].
//!
//! A rollback is skipped when a board load finished after the change was
//! applied, and a failure that arrives after [`EntityStore::reset`] is
//! dropped without a notice.
//!
//! State is published as `Arc`s. A reader holding a [`StoreSnapshot`] owns
//! a complete value that later mutations never touch, and a container that
//! did not change keeps its pointer identity.
//!
//! The lock is never held across an `.await`, so a second gesture can be
//! applied while an earlier one is still waiting for the service. Two
//! in-flight mutations on the same container are not serialized: the
//! second one's rollback target may include the first one's unconfirmed
//! change.

mod board_ops;
mod column_ops;
mod fetch;
mod task_ops;

#[cfg(test)]
mod tests;

use crate::gateway::BoardGateway;
use kanban_core::{KanbanError, KanbanResult, Notice};
use kanban_domain::{Board, BoardSummary};
use parking_lot::Mutex;
use std::future::Future;
use std::sync::Arc;

#[derive(Debug, Default)]
struct StoreState {
    boards: Arc<Vec<BoardSummary>>,
    current_board: Option<Arc<Board>>,
    is_loading: bool,
    error: Option<String>,
    notices: Vec<Notice>,
    /// Incremented by every board detail load; a load only installs its
    /// result if no newer load started meanwhile.
    load_seq: u64,
    /// The load that produced `current_board`.
    board_seq: u64,
    /// Incremented by `reset`.
    session: u64,
}

/// A value captured before an optimistic change, tagged with the load and
/// session it was taken from.
struct Rollback<T> {
    value: Arc<T>,
    board_seq: u64,
    session: u64,
}

/// Consistent read-only view of the store.
#[derive(Debug, Clone, Default)]
pub struct StoreSnapshot {
    pub boards: Arc<Vec<BoardSummary>>,
    pub current_board: Option<Arc<Board>>,
    pub is_loading: bool,
    pub error: Option<String>,
}

pub struct EntityStore {
    gateway: Arc<dyn BoardGateway>,
    state: Mutex<StoreState>,
}

impl EntityStore {
    pub fn new(gateway: Arc<dyn BoardGateway>) -> Self {
        Self {
            gateway,
            state: Mutex::new(StoreState::default()),
        }
    }

    pub fn snapshot(&self) -> StoreSnapshot {
        let state = self.state.lock();
        StoreSnapshot {
            boards: state.boards.clone(),
            current_board: state.current_board.clone(),
            is_loading: state.is_loading,
            error: state.error.clone(),
        }
    }

    pub fn boards(&self) -> Arc<Vec<BoardSummary>> {
        self.state.lock().boards.clone()
    }

    pub fn current_board(&self) -> Option<Arc<Board>> {
        self.state.lock().current_board.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.lock().is_loading
    }

    pub fn error(&self) -> Option<String> {
        self.state.lock().error.clone()
    }

    pub fn clear_error(&self) {
        self.state.lock().error = None;
    }

    /// Drain the notices queued by rolled-back mutations.
    pub fn take_notices(&self) -> Vec<Notice> {
        std::mem::take(&mut self.state.lock().notices)
    }

    /// Drop everything. Used when the session ends.
    pub fn reset(&self) {
        let mut state = self.state.lock();
        let (load_seq, session) = (state.load_seq, state.session);
        *state = StoreState {
            load_seq: load_seq + 1,
            session: session + 1,
            ..StoreState::default()
        };
        tracing::debug!("Store reset");
    }

    #[cfg(test)]
    pub(crate) fn set_current_board(&self, board: Board) {
        self.state.lock().current_board = Some(Arc::new(board));
    }

    #[cfg(test)]
    pub(crate) fn set_boards(&self, boards: Vec<BoardSummary>) {
        self.state.lock().boards = Arc::new(boards);
    }

    /// Apply `change` to a copy of the materialized board and publish it.
    /// Returns the previous board as the rollback target. When `change`
    /// fails nothing is published.
    fn apply_to_board<R>(
        &self,
        change: impl FnOnce(&mut Board) -> KanbanResult<R>,
    ) -> KanbanResult<(Rollback<Board>, R)> {
        let mut state = self.state.lock();
        let current = state
            .current_board
            .clone()
            .ok_or_else(|| KanbanError::Validation("No board is loaded".to_string()))?;

        let mut working = (*current).clone();
        let output = change(&mut working)?;
        state.current_board = Some(Arc::new(working));
        let rollback = Rollback {
            value: current,
            board_seq: state.board_seq,
            session: state.session,
        };
        Ok((rollback, output))
    }

    /// Await the gateway call; on failure restore `rollback` and queue a
    /// notice.
    async fn confirm_board<T>(
        &self,
        operation: &str,
        rollback: Rollback<Board>,
        call: impl Future<Output = KanbanResult<T>>,
    ) -> KanbanResult<T> {
        match call.await {
            Ok(value) => Ok(value),
            Err(error) => Err(self.rollback_board(operation, rollback, error)),
        }
    }

    fn rollback_board(
        &self,
        operation: &str,
        rollback: Rollback<Board>,
        error: KanbanError,
    ) -> KanbanError {
        tracing::warn!("Failed to save {}: {}. Reverting changes.", operation, error);
        let mut state = self.state.lock();
        if state.session != rollback.session {
            tracing::debug!("Session ended before {} failed; dropping notice", operation);
            return error;
        }

        // A load that finished meanwhile replaced the board; keep it.
        if state.board_seq == rollback.board_seq {
            state.current_board = Some(rollback.value);
        } else {
            tracing::debug!(
                "Board {} was loaded again; nothing to revert",
                rollback.value.id
            );
        }

        state.notices.push(Notice::rollback(operation, &error));
        error
    }

    /// Post-confirmation edit (placeholder reconciliation). Publishes only
    /// when `change` reports that it modified the board.
    fn reconcile_board(&self, change: impl FnOnce(&mut Board) -> bool) {
        let mut state = self.state.lock();
        let Some(current) = state.current_board.clone() else {
            return;
        };
        let mut working = (*current).clone();
        if change(&mut working) {
            state.current_board = Some(Arc::new(working));
        } else {
            tracing::debug!("Placeholder no longer present on board {}", current.id);
        }
    }

    fn apply_to_boards<R>(
        &self,
        change: impl FnOnce(&mut Vec<BoardSummary>) -> KanbanResult<R>,
    ) -> KanbanResult<(Rollback<Vec<BoardSummary>>, R)> {
        let mut state = self.state.lock();
        let current = state.boards.clone();
        let mut working = (*current).clone();
        let output = change(&mut working)?;
        state.boards = Arc::new(working);
        let rollback = Rollback {
            value: current,
            board_seq: state.board_seq,
            session: state.session,
        };
        Ok((rollback, output))
    }

    async fn confirm_boards<T>(
        &self,
        operation: &str,
        rollback: Rollback<Vec<BoardSummary>>,
        call: impl Future<Output = KanbanResult<T>>,
    ) -> KanbanResult<T> {
        match call.await {
            Ok(value) => Ok(value),
            Err(error) => {
                tracing::warn!("Failed to save {}: {}. Reverting changes.", operation, error);
                let mut state = self.state.lock();
                if state.session == rollback.session {
                    state.boards = rollback.value;
                    state.notices.push(Notice::rollback(operation, &error));
                } else {
                    tracing::debug!("Session ended before {} failed; dropping notice", operation);
                }
                Err(error)
            }
        }
    }
}
