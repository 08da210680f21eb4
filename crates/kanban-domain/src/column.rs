use kanban_core::{KanbanError, KanbanResult};
use serde::{Deserialize, Serialize};

use crate::id::EntityId;
use crate::ordering::{reindex, Positioned};
use crate::task::{Task, TaskId};

pub type ColumnId = EntityId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    pub id: ColumnId,
    pub title: String,
    #[serde(default)]
    pub position: i32,
    #[serde(default)]
    pub is_default: bool,
    /// Filled by a separate request; never part of the column payload.
    #[serde(default)]
    pub tasks: Vec<Task>,
}

impl Column {
    pub fn placeholder(title: String, position: i32) -> Self {
        Self {
            id: EntityId::pending(),
            title,
            position,
            is_default: false,
            tasks: Vec::new(),
        }
    }

    pub fn task_index(&self, task_id: TaskId) -> Option<usize> {
        self.tasks.iter().position(|t| t.id == task_id)
    }

    /// Append at the end and give the task the matching position.
    pub fn push_task(&mut self, mut task: Task) {
        task.position = self.tasks.len() as i32;
        self.tasks.push(task);
    }

    /// Remove a task and renormalize the positions of its siblings.
    pub fn remove_task(&mut self, task_id: TaskId) -> KanbanResult<Task> {
        let index = self
            .task_index(task_id)
            .ok_or_else(|| KanbanError::NotFound(format!("Task {} in column {}", task_id, self.id)))?;
        let task = self.tasks.remove(index);
        reindex(&mut self.tasks);
        Ok(task)
    }

    pub fn reindex_tasks(&mut self) {
        reindex(&mut self.tasks);
    }
}

impl Positioned for Column {
    fn position(&self) -> i32 {
        self.position
    }

    fn set_position(&mut self, position: i32) {
        self.position = position;
    }
}
