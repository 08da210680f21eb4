use kanban_core::{KanbanError, KanbanResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Identifier issued by the board service.
pub type RemoteId = i64;

const PENDING_PREFIX: &str = "pending-";

/// Identity of a board, column or task.
///
/// Entities loaded from the service carry a `Remote` id. Entities created
/// locally carry a `Pending` placeholder until the service answers with
/// the real one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntityId {
    Remote(RemoteId),
    Pending(Uuid),
}

impl EntityId {
    pub fn pending() -> Self {
        EntityId::Pending(Uuid::new_v4())
    }

    pub fn remote(&self) -> Option<RemoteId> {
        match self {
            EntityId::Remote(id) => Some(*id),
            EntityId::Pending(_) => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, EntityId::Pending(_))
    }

    /// The service id, or a validation error naming `what` if the entity
    /// has not been confirmed yet.
    pub fn require_remote(&self, what: &str) -> KanbanResult<RemoteId> {
        self.remote().ok_or_else(|| {
            KanbanError::Validation(format!("{} {} is still being created", what, self))
        })
    }
}

impl From<RemoteId> for EntityId {
    fn from(id: RemoteId) -> Self {
        EntityId::Remote(id)
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityId::Remote(id) => write!(f, "{}", id),
            EntityId::Pending(uuid) => write!(f, "{}{}", PENDING_PREFIX, uuid),
        }
    }
}

impl FromStr for EntityId {
    type Err = KanbanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(id) = s.parse::<RemoteId>() {
            return Ok(EntityId::Remote(id));
        }
        let raw = s.strip_prefix(PENDING_PREFIX).unwrap_or(s);
        Uuid::parse_str(raw)
            .map(EntityId::Pending)
            .map_err(|_| KanbanError::Validation(format!("Invalid entity id: '{}'", s)))
    }
}
