//! Trak - a file-backed ticket tracker.
//!
//! Core library for the `trak` CLI and MCP server: domain types, the record
//! store with its JSONL persistence, the pure query layer, and workspace
//! configuration.

#![forbid(unsafe_code)]

pub mod domain;
pub mod error;
pub mod id;
pub mod query;
pub mod store;
pub mod workspace;

pub use domain::{Sprint, Ticket, User};
pub use error::{Error, Result};
