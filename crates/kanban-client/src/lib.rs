pub mod credentials;
pub mod gateway;
pub mod gesture;
pub mod http;
pub mod session;
pub mod store;

pub use credentials::{CredentialSource, StaticToken};
pub use gateway::BoardGateway;
pub use gesture::{dispatch, normalize, DragEndEvent, DragKind, DragLocation};
pub use http::HttpGateway;
pub use session::Session;
pub use store::{EntityStore, StoreSnapshot};
