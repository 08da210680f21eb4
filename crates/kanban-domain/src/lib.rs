pub mod board;
pub mod column;
pub mod commands;
pub mod id;
pub mod ordering;
pub mod task;
pub mod validation;

pub use board::{Board, BoardId, BoardSummary};
pub use column::{Column, ColumnId};
pub use commands::{BoardCommand, ReorderCommand};
pub use id::{EntityId, RemoteId};
pub use ordering::Positioned;
pub use task::{Task, TaskId, TaskPatch};
pub use validation::validate_title;
