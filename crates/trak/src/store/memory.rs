//! In-memory record store.
//!
//! Holds every collection in a `HashMap` behind a `tokio` mutex so the
//! store can be shared across async tasks. The JSONL backend reuses this
//! store as its working set.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::domain::{
    NewSprint, NewTicket, NewUser, Sprint, SprintId, SprintStatus, Ticket, TicketId, TicketStatus,
    TicketType, User, UserId,
};
use crate::error::{Error, Result};
use crate::id::{IdGenerator, SPRINT_PREFIX, USER_PREFIX};

use super::{RecordStore, StoreSnapshot};

/// Inner storage structure (not thread-safe on its own).
struct StoreInner {
    tickets: HashMap<TicketId, Ticket>,
    sprints: HashMap<SprintId, Sprint>,
    users: HashMap<UserId, User>,
    id_generator: IdGenerator,

    /// Prefix for ticket ids (e.g. "trak")
    prefix: String,
}

impl StoreInner {
    fn new(prefix: String) -> Self {
        Self {
            tickets: HashMap::new(),
            sprints: HashMap::new(),
            users: HashMap::new(),
            id_generator: IdGenerator::new(),
            prefix,
        }
    }

    fn from_snapshot(snapshot: StoreSnapshot, prefix: String) -> Self {
        let mut inner = Self::new(prefix);
        for ticket in snapshot.tickets {
            inner.id_generator.register_id(ticket.id.as_str());
            inner.tickets.insert(ticket.id.clone(), ticket);
        }
        for sprint in snapshot.sprints {
            inner.id_generator.register_id(sprint.id.as_str());
            inner.sprints.insert(sprint.id.clone(), sprint);
        }
        for user in snapshot.users {
            inner.id_generator.register_id(user.id.as_str());
            inner.users.insert(user.id.clone(), user);
        }
        inner
    }
}

/// In-memory implementation of [`RecordStore`].
pub struct MemoryStore {
    inner: Arc<Mutex<StoreInner>>,
}

/// Create an empty in-memory store.
pub fn new_memory_store(prefix: String) -> Box<dyn RecordStore> {
    Box::new(MemoryStore {
        inner: Arc::new(Mutex::new(StoreInner::new(prefix))),
    })
}

/// Create an in-memory store pre-populated from a snapshot, registering all
/// existing ids with the generator.
pub fn from_snapshot(snapshot: StoreSnapshot, prefix: String) -> Box<dyn RecordStore> {
    Box::new(MemoryStore {
        inner: Arc::new(Mutex::new(StoreInner::from_snapshot(snapshot, prefix))),
    })
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn tickets_by_type(&self, ticket_type: TicketType) -> Result<Vec<Ticket>> {
        let inner = self.inner.lock().await;
        Ok(inner
            .tickets
            .values()
            .filter(|t| t.ticket_type == ticket_type)
            .cloned()
            .collect())
    }

    async fn sprints(&self) -> Result<Vec<Sprint>> {
        let inner = self.inner.lock().await;
        Ok(inner.sprints.values().cloned().collect())
    }

    async fn users(&self) -> Result<Vec<User>> {
        let inner = self.inner.lock().await;
        Ok(inner.users.values().cloned().collect())
    }

    async fn create_ticket(&mut self, new_ticket: NewTicket) -> Result<Ticket> {
        new_ticket.validate().map_err(Error::Validation)?;

        let mut inner = self.inner.lock().await;
        let prefix = inner.prefix.clone();
        let id = inner.id_generator.generate(&prefix, &new_ticket.title)?;

        let now = Utc::now();
        let ticket = Ticket {
            id: TicketId::new(id),
            ticket_type: new_ticket.ticket_type,
            title: new_ticket.title.trim().to_string(),
            description: new_ticket.description,
            status: TicketStatus::Todo,
            assignee: new_ticket.assignee,
            sprint: new_ticket.sprint,
            estimate: new_ticket.estimate,
            labels: new_ticket.labels,
            priority: new_ticket.priority,
            created_at: now,
            updated_at: now,
        };
        inner.tickets.insert(ticket.id.clone(), ticket.clone());
        Ok(ticket)
    }

    async fn create_sprint(&mut self, new_sprint: NewSprint) -> Result<Sprint> {
        new_sprint.validate().map_err(Error::Validation)?;

        let mut inner = self.inner.lock().await;
        let id = inner
            .id_generator
            .generate(SPRINT_PREFIX, &new_sprint.name)?;

        let now = Utc::now();
        let sprint = Sprint {
            id: SprintId::new(id),
            name: new_sprint.name.trim().to_string(),
            description: new_sprint.description,
            status: new_sprint.status.unwrap_or(SprintStatus::Planning),
            start_date: new_sprint.start_date,
            end_date: new_sprint.end_date,
            goal: new_sprint.goal,
            created_at: now,
            updated_at: now,
        };
        inner.sprints.insert(sprint.id.clone(), sprint.clone());
        Ok(sprint)
    }

    async fn create_user(&mut self, new_user: NewUser) -> Result<User> {
        new_user.validate().map_err(Error::Validation)?;

        let mut inner = self.inner.lock().await;
        let username = new_user.username.trim();
        if inner.users.values().any(|u| u.username == username) {
            return Err(Error::Validation(format!(
                "Username already exists: {}",
                username
            )));
        }

        let id = inner.id_generator.generate(USER_PREFIX, username)?;

        let now = Utc::now();
        let user = User {
            id: UserId::new(id),
            username: username.to_string(),
            display_name: new_user.display_name.trim().to_string(),
            email: new_user.email,
            created_at: now,
            updated_at: now,
        };
        inner.users.insert(user.id.clone(), user.clone());
        Ok(user)
    }

    async fn update_ticket_status(
        &mut self,
        id: &TicketId,
        status: TicketStatus,
    ) -> Result<Ticket> {
        let mut inner = self.inner.lock().await;
        let ticket = inner
            .tickets
            .get_mut(id)
            .ok_or_else(|| Error::ticket_not_found(id.as_str()))?;
        ticket.status = status;
        ticket.updated_at = Utc::now();
        Ok(ticket.clone())
    }

    async fn update_sprint_status(
        &mut self,
        id: &SprintId,
        status: SprintStatus,
    ) -> Result<Sprint> {
        let mut inner = self.inner.lock().await;
        let sprint = inner
            .sprints
            .get_mut(id)
            .ok_or_else(|| Error::sprint_not_found(id.as_str()))?;
        sprint.status = status;
        sprint.updated_at = Utc::now();
        Ok(sprint.clone())
    }

    async fn delete_ticket(&mut self, id: &TicketId) -> Result<()> {
        let mut inner = self.inner.lock().await;
        inner
            .tickets
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| Error::ticket_not_found(id.as_str()))
    }

    async fn export_all(&self) -> Result<StoreSnapshot> {
        let inner = self.inner.lock().await;

        let mut tickets: Vec<Ticket> = inner.tickets.values().cloned().collect();
        let mut sprints: Vec<Sprint> = inner.sprints.values().cloned().collect();
        let mut users: Vec<User> = inner.users.values().cloned().collect();

        // Deterministic file output regardless of map iteration order
        tickets.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        sprints.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        users.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));

        Ok(StoreSnapshot {
            tickets,
            sprints,
            users,
        })
    }

    async fn save(&self) -> Result<()> {
        // Nothing to persist for the pure in-memory backend
        Ok(())
    }

    async fn reload(&mut self) -> Result<()> {
        // No backing store to reload from
        Ok(())
    }
}
