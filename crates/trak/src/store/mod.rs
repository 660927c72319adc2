//! Storage abstraction for tickets, sprints, and users.
//!
//! The [`RecordStore`] trait is object-safe so callers hold a
//! `Box<dyn RecordStore>` regardless of backend. Two backends exist:
//!
//! - **In-memory**: ephemeral, used directly in tests and as the working set
//!   of the JSONL backend.
//! - **JSONL**: the in-memory store wrapped with file persistence, one JSON
//!   Lines file per collection under the workspace data directory.
//!
//! # Example
//!
//! ```no_run
//! use trak::store::{create_store, RecordStore, StoreBackend};
//! use trak::domain::{NewTicket, TicketType};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> trak::Result<()> {
//!     let mut store = create_store(StoreBackend::InMemory, "trak".to_string()).await?;
//!
//!     let ticket = store
//!         .create_ticket(NewTicket {
//!             ticket_type: TicketType::Task,
//!             title: "Wire up login flow".to_string(),
//!             description: None,
//!             assignee: None,
//!             sprint: None,
//!             estimate: None,
//!             labels: vec![],
//!             priority: None,
//!         })
//!         .await?;
//!     println!("created {}", ticket.id);
//!     Ok(())
//! }
//! ```

use async_trait::async_trait;
use std::path::PathBuf;

use crate::domain::{
    NewSprint, NewTicket, NewUser, Sprint, SprintId, SprintStatus, Ticket, TicketId, TicketStatus,
    TicketType, User,
};
use crate::error::Result;

pub mod jsonl;
pub mod memory;

/// A full copy of every collection in a store, used for persistence and
/// bulk loading.
#[derive(Debug, Clone, Default)]
pub struct StoreSnapshot {
    /// All tickets, tasks and bugs alike
    pub tickets: Vec<Ticket>,

    /// All sprints
    pub sprints: Vec<Sprint>,

    /// All users
    pub users: Vec<User>,
}

/// Core storage trait for ticket tracking.
///
/// Implementations must be `Send + Sync`; the MCP server shares one store
/// across tool calls behind a lock. All reads return full collections with
/// no ordering guarantee; callers filter and sort through the `query`
/// module.
///
/// Every create method validates its input before touching the collection
/// and every mutation refreshes the record's `updated_at`.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// All tickets of the given type.
    async fn tickets_by_type(&self, ticket_type: TicketType) -> Result<Vec<Ticket>>;

    /// All sprints.
    async fn sprints(&self) -> Result<Vec<Sprint>>;

    /// All users.
    async fn users(&self) -> Result<Vec<User>>;

    /// Create a ticket, assigning a generated id and both timestamps.
    ///
    /// # Errors
    ///
    /// `Error::Validation` for an empty or overlong title or a negative
    /// estimate.
    async fn create_ticket(&mut self, new_ticket: NewTicket) -> Result<Ticket>;

    /// Create a sprint. New sprints default to planning status unless the
    /// caller supplies one.
    ///
    /// # Errors
    ///
    /// `Error::Validation` for an empty name.
    async fn create_sprint(&mut self, new_sprint: NewSprint) -> Result<Sprint>;

    /// Create a user.
    ///
    /// # Errors
    ///
    /// `Error::Validation` for a malformed username, an empty display name,
    /// or a username already taken.
    async fn create_user(&mut self, new_user: NewUser) -> Result<User>;

    /// Set a ticket's status and refresh its `updated_at`.
    ///
    /// # Errors
    ///
    /// `Error::NotFound` for an unknown id.
    async fn update_ticket_status(
        &mut self,
        id: &TicketId,
        status: TicketStatus,
    ) -> Result<Ticket>;

    /// Set a sprint's status and refresh its `updated_at`.
    ///
    /// # Errors
    ///
    /// `Error::NotFound` for an unknown id.
    async fn update_sprint_status(
        &mut self,
        id: &SprintId,
        status: SprintStatus,
    ) -> Result<Sprint>;

    /// Remove a ticket.
    ///
    /// # Errors
    ///
    /// `Error::NotFound` for an unknown id; deletion is never a silent
    /// no-op.
    async fn delete_ticket(&mut self, id: &TicketId) -> Result<()>;

    /// Export every collection, suitable for persistence or backup.
    async fn export_all(&self) -> Result<StoreSnapshot>;

    /// Write changes to persistent storage.
    ///
    /// Takes `&self` so callers can save from shared references;
    /// implementations use interior mutability. A no-op for the pure
    /// in-memory backend.
    async fn save(&self) -> Result<()>;

    /// Discard in-memory changes and restore the on-disk state.
    ///
    /// A no-op for the pure in-memory backend. Used after a failed `save()`
    /// to keep a long-running server consistent with disk.
    async fn reload(&mut self) -> Result<()>;
}

/// Storage backend configuration.
#[derive(Debug, Clone)]
pub enum StoreBackend {
    /// In-memory storage (ephemeral)
    InMemory,

    /// JSONL file storage rooted at the given data directory (persistent)
    Jsonl(PathBuf),
}

/// Wrapper that adds JSONL file persistence to the in-memory store.
///
/// `save()` snapshots the inner store and writes each collection to its
/// file atomically; `reload()` rebuilds the inner store from disk.
struct JsonlBackedStore {
    inner: Box<dyn RecordStore>,
    dir: PathBuf,
    prefix: String,
}

#[async_trait]
impl RecordStore for JsonlBackedStore {
    async fn tickets_by_type(&self, ticket_type: TicketType) -> Result<Vec<Ticket>> {
        self.inner.tickets_by_type(ticket_type).await
    }

    async fn sprints(&self) -> Result<Vec<Sprint>> {
        self.inner.sprints().await
    }

    async fn users(&self) -> Result<Vec<User>> {
        self.inner.users().await
    }

    async fn create_ticket(&mut self, new_ticket: NewTicket) -> Result<Ticket> {
        self.inner.create_ticket(new_ticket).await
    }

    async fn create_sprint(&mut self, new_sprint: NewSprint) -> Result<Sprint> {
        self.inner.create_sprint(new_sprint).await
    }

    async fn create_user(&mut self, new_user: NewUser) -> Result<User> {
        self.inner.create_user(new_user).await
    }

    async fn update_ticket_status(
        &mut self,
        id: &TicketId,
        status: TicketStatus,
    ) -> Result<Ticket> {
        self.inner.update_ticket_status(id, status).await
    }

    async fn update_sprint_status(
        &mut self,
        id: &SprintId,
        status: SprintStatus,
    ) -> Result<Sprint> {
        self.inner.update_sprint_status(id, status).await
    }

    async fn delete_ticket(&mut self, id: &TicketId) -> Result<()> {
        self.inner.delete_ticket(id).await
    }

    async fn export_all(&self) -> Result<StoreSnapshot> {
        self.inner.export_all().await
    }

    async fn save(&self) -> Result<()> {
        let snapshot = self.inner.export_all().await?;
        jsonl::save_snapshot(&self.dir, &snapshot).await
    }

    async fn reload(&mut self) -> Result<()> {
        let snapshot = jsonl::load_snapshot(&self.dir).await?;
        self.inner = memory::from_snapshot(snapshot, self.prefix.clone());
        Ok(())
    }
}

/// Create a store for the given backend.
///
/// The `prefix` seeds generated ticket ids (e.g. "trak" yields ids like
/// "trak-a3f8"); it comes from the workspace configuration.
///
/// # Errors
///
/// `Error::Storage` when a JSONL data file exists but contains a malformed
/// line; a missing file is treated as an empty collection (first run).
pub async fn create_store(backend: StoreBackend, prefix: String) -> Result<Box<dyn RecordStore>> {
    match backend {
        StoreBackend::InMemory => Ok(memory::new_memory_store(prefix)),
        StoreBackend::Jsonl(dir) => {
            let snapshot = jsonl::load_snapshot(&dir).await?;
            let inner = memory::from_snapshot(snapshot, prefix.clone());
            Ok(Box::new(JsonlBackedStore { inner, dir, prefix }))
        }
    }
}
