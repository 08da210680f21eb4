use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A user-facing message produced when a background write failed and the
/// local state was reverted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notice {
    pub timestamp: DateTime<Utc>,
    pub operation: String,
    pub message: String,
}

impl Notice {
    pub fn new(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            operation: operation.into(),
            message: message.into(),
        }
    }

    pub fn rollback(operation: &str, cause: &crate::KanbanError) -> Self {
        Self::new(
            operation,
            format!("Failed to save {}. Reverting changes. ({})", operation, cause),
        )
    }
}
