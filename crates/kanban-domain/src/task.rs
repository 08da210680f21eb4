use kanban_core::KanbanResult;
use serde::{Deserialize, Serialize};

use crate::id::EntityId;
use crate::ordering::Positioned;
use crate::validation::validate_title;

pub type TaskId = EntityId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub position: i32,
}

impl Task {
    /// Local stand-in shown while the service creates the real task.
    pub fn placeholder(title: String, description: Option<String>, position: i32) -> Self {
        Self {
            id: EntityId::pending(),
            title,
            description,
            position,
        }
    }

    /// Apply only the fields present in `patch`.
    pub fn apply_patch(&mut self, patch: &TaskPatch) {
        if let Some(title) = &patch.title {
            self.title = title.clone();
        }
        if let Some(description) = &patch.description {
            self.description = Some(description.clone());
        }
    }
}

impl Positioned for Task {
    fn position(&self) -> i32 {
        self.position
    }

    fn set_position(&mut self, position: i32) {
        self.position = position;
    }
}

/// Partial update of a task. Absent fields are left untouched both locally
/// and on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl TaskPatch {
    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            description: None,
        }
    }

    pub fn description(description: impl Into<String>) -> Self {
        Self {
            title: None,
            description: Some(description.into()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none()
    }

    pub fn validate(&self) -> KanbanResult<()> {
        if let Some(title) = &self.title {
            validate_title(title, "Task title")?;
        }
        Ok(())
    }
}
