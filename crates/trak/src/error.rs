//! Error types for trak operations.

use std::io;
use thiserror::Error;

/// The error type for trak operations.
#[derive(Debug, Error)]
pub enum Error {
    /// IO error occurred.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Input failed validation before reaching the store.
    #[error("Validation error: {0}")]
    Validation(String),

    /// A record with the given id does not exist.
    #[error("{kind} not found: {id}")]
    NotFound {
        /// Record kind ("ticket", "sprint", or "user")
        kind: &'static str,
        /// The id that was looked up
        id: String,
    },

    /// Storage error (corrupt data file, unwritable directory, ...).
    #[error("Storage error: {0}")]
    Storage(String),

    /// Record serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Shorthand for a ticket lookup miss.
    pub fn ticket_not_found(id: impl Into<String>) -> Self {
        Self::NotFound {
            kind: "Ticket",
            id: id.into(),
        }
    }

    /// Shorthand for a sprint lookup miss.
    pub fn sprint_not_found(id: impl Into<String>) -> Self {
        Self::NotFound {
            kind: "Sprint",
            id: id.into(),
        }
    }

    /// Shorthand for a user lookup miss.
    pub fn user_not_found(id: impl Into<String>) -> Self {
        Self::NotFound {
            kind: "User",
            id: id.into(),
        }
    }
}

/// A specialized Result type for trak operations.
pub type Result<T> = std::result::Result<T, Error>;
