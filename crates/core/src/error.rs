//! Error types for the core library

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Task with ID {id} already exists")]
    DuplicateTask { id: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Database '{name}' is closed")]
    DatabaseClosed { name: String },

    #[error("Database '{name}' was wiped; reopen it before further use")]
    DatabaseWiped { name: String },

    #[error("Deleting database '{name}' is blocked by {connections} open connection(s)")]
    DeletionBlocked { name: String, connections: usize },

    #[error("Database '{name}' is at version {found}, newer than the supported version {supported}")]
    VersionMismatch {
        name: String,
        found: u32,
        supported: u32,
    },
}
