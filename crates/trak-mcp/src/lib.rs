//! MCP server for trak ticket tracking.
//!
//! This crate provides an MCP (Model Context Protocol) server that exposes
//! a trak workspace to AI assistants. The workspace is discovered once at
//! startup by walking up from the working directory to the nearest `.trak/`
//! directory; every tool call reads and writes that workspace's JSONL files.
//!
//! # Tools
//!
//! ## Tickets
//! - `list_tickets` - List tasks or bugs with filters
//! - `create_ticket` - Create a task or bug
//! - `update_ticket_status` - Move a ticket between todo/progress/done
//! - `delete_ticket` - Remove a ticket
//!
//! ## Sprints
//! - `list_sprints` - List sprints, optionally by status
//! - `create_sprint` - Create a sprint
//! - `update_sprint_status` - Move a sprint between planning/active/completed
//!
//! ## Users
//! - `list_users` - List all users
//! - `create_user` - Create a user

use std::path::Path;

pub mod error;
pub mod models;
pub mod server;
pub mod tools;

pub use error::{Error, Result};
pub use server::TrakMcpServer;

/// Discover the workspace at or above `working_dir` and serve MCP over
/// stdio until the client disconnects.
///
/// This is the entry point shared by the standalone `trak-mcp` binary and
/// the CLI's `mcp` subcommand.
pub async fn run_stdio_server(working_dir: &Path) -> Result<()> {
    let server = TrakMcpServer::from_directory(working_dir).await?;
    server.run().await
}
