pub mod api;
pub mod cli;
pub mod config;
pub mod entity;
pub mod error;
pub mod storage;

pub use api::{router, AppState};
pub use config::ServerConfig;
pub use error::{Result, TasklistError};
pub use storage::TodoStore;
