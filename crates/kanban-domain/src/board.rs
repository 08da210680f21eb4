use kanban_core::{KanbanError, KanbanResult};
use serde::{Deserialize, Serialize};

use crate::column::{Column, ColumnId};
use crate::id::EntityId;
use crate::ordering::{check_insert_index, move_item, reindex};
use crate::task::{Task, TaskId};

pub type BoardId = EntityId;

/// Entry of the user's board list. Never carries columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSummary {
    pub id: BoardId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl BoardSummary {
    pub fn placeholder(name: String) -> Self {
        Self {
            id: EntityId::pending(),
            name,
            description: None,
        }
    }
}

/// A fully materialized board: ordered columns, each with ordered tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    pub id: BoardId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub columns: Vec<Column>,
}

impl Board {
    pub fn new(id: BoardId, name: String, columns: Vec<Column>) -> Self {
        Self {
            id,
            name,
            description: None,
            columns,
        }
    }

    pub fn from_summary(summary: &BoardSummary, columns: Vec<Column>) -> Self {
        Self {
            id: summary.id,
            name: summary.name.clone(),
            description: summary.description.clone(),
            columns,
        }
    }

    pub fn column_index(&self, column_id: ColumnId) -> Option<usize> {
        self.columns.iter().position(|c| c.id == column_id)
    }

    pub fn column(&self, column_id: ColumnId) -> Option<&Column> {
        self.columns.iter().find(|c| c.id == column_id)
    }

    pub fn column_mut(&mut self, column_id: ColumnId) -> Option<&mut Column> {
        self.columns.iter_mut().find(|c| c.id == column_id)
    }

    /// (column index, task index) of a task anywhere on the board.
    pub fn task_location(&self, task_id: TaskId) -> Option<(usize, usize)> {
        self.columns
            .iter()
            .enumerate()
            .find_map(|(ci, column)| column.task_index(task_id).map(|ti| (ci, ti)))
    }

    pub fn find_task(&self, task_id: TaskId) -> Option<&Task> {
        let (ci, ti) = self.task_location(task_id)?;
        Some(&self.columns[ci].tasks[ti])
    }

    pub fn task_mut(&mut self, task_id: TaskId) -> Option<&mut Task> {
        let (ci, ti) = self.task_location(task_id)?;
        Some(&mut self.columns[ci].tasks[ti])
    }

    /// Order columns by the position the service reported. Only used once,
    /// right after a load.
    pub fn sort_columns_by_position(&mut self) {
        self.columns.sort_by_key(|c| c.position);
    }

    pub fn push_column(&mut self, mut column: Column) {
        column.position = self.columns.len() as i32;
        self.columns.push(column);
    }

    pub fn remove_column(&mut self, column_id: ColumnId) -> KanbanResult<Column> {
        let index = self
            .column_index(column_id)
            .ok_or_else(|| KanbanError::NotFound(format!("Column {}", column_id)))?;
        let column = self.columns.remove(index);
        reindex(&mut self.columns);
        Ok(column)
    }

    /// Swap a placeholder column for the one the service returned, keeping
    /// its slot and any tasks already attached locally.
    pub fn replace_column(&mut self, placeholder_id: ColumnId, mut column: Column) -> bool {
        match self.column_index(placeholder_id) {
            Some(index) => {
                let previous = std::mem::take(&mut self.columns[index].tasks);
                column.tasks = previous;
                column.position = index as i32;
                self.columns[index] = column;
                true
            }
            None => false,
        }
    }

    /// Swap a placeholder task for the one the service returned, in place.
    pub fn replace_task(&mut self, placeholder_id: TaskId, task: Task) -> bool {
        match self.task_location(placeholder_id) {
            Some((ci, ti)) => {
                let column = &mut self.columns[ci];
                column.tasks[ti] = task;
                column.reindex_tasks();
                true
            }
            None => false,
        }
    }

    /// Detach the column at `from` and reinsert it at `to`, where `to` is
    /// interpreted against the list after removal.
    pub fn move_column(&mut self, column_id: ColumnId, from: usize, to: usize) -> KanbanResult<()> {
        match self.columns.get(from) {
            Some(column) if column.id == column_id => {}
            _ => {
                return Err(KanbanError::Validation(format!(
                    "Column {} is not at index {}",
                    column_id, from
                )))
            }
        }
        move_item(&mut self.columns, from, to)?;
        reindex(&mut self.columns);
        Ok(())
    }

    /// Detach a task from `source` at `from` and insert it into `dest` at
    /// `to`. Source and destination may be the same column.
    pub fn move_task(
        &mut self,
        task_id: TaskId,
        source: ColumnId,
        dest: ColumnId,
        from: usize,
        to: usize,
    ) -> KanbanResult<()> {
        let source_index = self
            .column_index(source)
            .ok_or_else(|| KanbanError::NotFound(format!("Column {}", source)))?;
        let dest_index = self
            .column_index(dest)
            .ok_or_else(|| KanbanError::NotFound(format!("Column {}", dest)))?;

        match self.columns[source_index].tasks.get(from) {
            Some(task) if task.id == task_id => {}
            _ => {
                return Err(KanbanError::Validation(format!(
                    "Task {} is not at index {} of column {}",
                    task_id, from, source
                )))
            }
        }

        if source_index == dest_index {
            let column = &mut self.columns[source_index];
            move_item(&mut column.tasks, from, to)?;
            column.reindex_tasks();
            return Ok(());
        }

        check_insert_index(self.columns[dest_index].tasks.len(), to)?;

        let task = self.columns[source_index].tasks.remove(from);
        self.columns[source_index].reindex_tasks();

        let dest_column = &mut self.columns[dest_index];
        dest_column.tasks.insert(to, task);
        dest_column.reindex_tasks();
        Ok(())
    }
}
