//! Error types for the trak MCP server.

use thiserror::Error;

/// Errors that can occur in the trak MCP server.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid argument value provided.
    #[error("Invalid {field}: '{value}'. Valid values: {valid_values}")]
    InvalidArgument {
        /// The field name that had an invalid value.
        field: &'static str,
        /// The invalid value that was provided.
        value: String,
        /// Description of valid values.
        valid_values: &'static str,
    },

    /// No trak workspace was found at or above the starting directory.
    #[error("No .trak directory found in {0} or parent directories")]
    NoTrakDirectory(String),

    /// An error from the trak core layer.
    #[error(transparent)]
    Trak(#[from] trak::Error),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// MCP protocol error.
    #[error("MCP error: {0}")]
    Mcp(String),
}

/// Result type for trak MCP operations.
pub type Result<T> = std::result::Result<T, Error>;
