//! Drag-and-drop results turned into store moves.

use crate::store::EntityStore;
use kanban_core::{KanbanError, KanbanResult};
use kanban_domain::{EntityId, ReorderCommand};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DragKind {
    Column,
    Task,
}

/// A droppable container and a slot in it. For column drags the container
/// is the board itself; for task drags it is a column id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DragLocation {
    pub container_id: String,
    pub index: usize,
}

impl DragLocation {
    pub fn new(container_id: impl Into<String>, index: usize) -> Self {
        Self {
            container_id: container_id.into(),
            index,
        }
    }
}

/// What a drag-and-drop library reports when an item is released.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DragEndEvent {
    pub draggable_id: String,
    #[serde(rename = "type")]
    pub kind: DragKind,
    pub source: DragLocation,
    #[serde(default)]
    pub destination: Option<DragLocation>,
}

fn parse_id(raw: &str, what: &str) -> KanbanResult<EntityId> {
    raw.parse::<EntityId>().map_err(|_| {
        KanbanError::Validation(format!("Invalid {} id in drag event: '{}'", what, raw))
    })
}

/// Reduce a drop to a reorder command, or `None` when nothing would move:
/// the item was released outside any container, or back onto its own slot.
pub fn normalize(event: &DragEndEvent) -> KanbanResult<Option<ReorderCommand>> {
    let Some(destination) = &event.destination else {
        return Ok(None);
    };
    let source = &event.source;

    let command = match event.kind {
        // Columns only ever move within one board.
        DragKind::Column => {
            if source.index == destination.index {
                return Ok(None);
            }
            ReorderCommand::Column {
                column_id: parse_id(&event.draggable_id, "column")?,
                source_index: source.index,
                dest_index: destination.index,
            }
        }
        DragKind::Task => {
            if source == destination {
                return Ok(None);
            }
            ReorderCommand::Task {
                task_id: parse_id(&event.draggable_id, "task")?,
                source_column_id: parse_id(&source.container_id, "column")?,
                dest_column_id: parse_id(&destination.container_id, "column")?,
                source_index: source.index,
                dest_index: destination.index,
            }
        }
    };
    Ok(Some(command))
}

pub async fn dispatch(store: &EntityStore, command: ReorderCommand) -> KanbanResult<()> {
    match command {
        ReorderCommand::Column {
            column_id,
            source_index,
            dest_index,
        } => store.move_column(column_id, source_index, dest_index).await,
        ReorderCommand::Task {
            task_id,
            source_column_id,
            dest_column_id,
            source_index,
            dest_index,
        } => {
            store
                .move_task(
                    task_id,
                    source_column_id,
                    dest_column_id,
                    source_index,
                    dest_index,
                )
                .await
        }
    }
}
