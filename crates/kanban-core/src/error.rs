use thiserror::Error;

#[derive(Error, Debug)]
pub enum KanbanError {
    #[error("Unauthorized: missing or expired credentials")]
    Unauthorized,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl KanbanError {
    /// Classify a non-success HTTP status returned by the board service.
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match status {
            401 | 403 => KanbanError::Unauthorized,
            404 => KanbanError::NotFound(message),
            409 => KanbanError::Conflict(message),
            _ => KanbanError::Server { status, message },
        }
    }

    /// True for failures raised locally before anything was sent or changed.
    pub fn is_validation(&self) -> bool {
        matches!(self, KanbanError::Validation(_))
    }
}
