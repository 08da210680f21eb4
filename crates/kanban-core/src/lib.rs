pub mod config;
pub mod error;
pub mod notice;
pub mod result;
pub mod selection;

pub use config::ClientConfig;
pub use error::KanbanError;
pub use notice::Notice;
pub use result::KanbanResult;
pub use selection::FocusState;
