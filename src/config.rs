use std::net::SocketAddr;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::storage::DEFAULT_DATA_FILE;

pub const DEFAULT_PORT: u16 = 3001;

/// Settings for the HTTP server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// TCP port to listen on, on all interfaces.
    pub port: u16,
    /// JSON file the todo list is mirrored to.
    pub data_file: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
        }
    }
}

impl ServerConfig {
    pub fn new(port: u16, data_file: impl Into<PathBuf>) -> Self {
        Self {
            port,
            data_file: data_file.into(),
        }
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }
}
