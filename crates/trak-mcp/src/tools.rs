//! Tool implementations backing the MCP server.
//!
//! Each method maps one MCP tool onto the shared store. Mutating tools
//! persist with `save()` before returning so a crash between calls never
//! loses acknowledged writes; a failed save triggers a `reload()` to keep
//! the in-memory state consistent with disk.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::error::Result;
use crate::models::{
    self, CreateSprintParams, CreateTicketParams, CreateUserParams, DeleteResponse,
    DeleteTicketParams, ListSprintsParams, ListTicketsParams, McpSprint, McpTicket, McpUser,
    UpdateSprintStatusParams, UpdateTicketStatusParams,
};
use trak::domain::{NewSprint, NewTicket, NewUser, SprintId, TicketId, TicketType};
use trak::query::{self, TicketFilter};
use trak::store::RecordStore;

/// Shared handle to the workspace store.
pub type SharedStore = Arc<RwLock<Box<dyn RecordStore>>>;

/// Tool implementations over a shared [`RecordStore`].
#[derive(Clone)]
pub struct Tools {
    store: SharedStore,
}

impl Tools {
    /// Create a new tool set over the given store.
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    /// Save the store, reloading from disk if the save fails.
    async fn save(&self, store: &mut Box<dyn RecordStore>) -> Result<()> {
        if let Err(e) = store.save().await {
            warn!("save failed, reloading from disk: {}", e);
            store.reload().await?;
            return Err(e.into());
        }
        Ok(())
    }

    /// List tickets of one type, filtered and sorted by most recent update.
    pub async fn list_tickets(&self, params: ListTicketsParams) -> Result<Vec<McpTicket>> {
        let ticket_type = models::parse_ticket_type(&params.ticket_type)?;
        let filter = TicketFilter {
            status: params
                .status
                .as_deref()
                .map(models::parse_ticket_status)
                .transpose()?,
            assignee: params.assignee,
            sprint: params.sprint,
            search: params.search,
        };

        let store = self.store.read().await;
        let tickets = store.tickets_by_type(ticket_type).await?;
        drop(store);

        let mut tickets = query::filter_tickets(tickets, &filter);
        query::sort_tickets(
            &mut tickets,
            query::SortKey::default(),
            query::SortOrder::default(),
        );
        debug!("list_tickets returned {} tickets", tickets.len());
        Ok(tickets.into_iter().map(Into::into).collect())
    }

    /// Create a ticket and persist it.
    pub async fn create_ticket(&self, params: CreateTicketParams) -> Result<McpTicket> {
        let ticket_type = params
            .ticket_type
            .as_deref()
            .map(models::parse_ticket_type)
            .transpose()?
            .unwrap_or(TicketType::Task);
        let priority = params
            .priority
            .as_deref()
            .map(models::parse_priority)
            .transpose()?;

        let new_ticket = NewTicket {
            ticket_type,
            title: params.title,
            description: params.description,
            assignee: params.assignee.map(Into::into),
            sprint: params.sprint.map(Into::into),
            estimate: params.estimate,
            labels: params.labels.unwrap_or_default(),
            priority,
        };

        let mut store = self.store.write().await;
        let ticket = store.create_ticket(new_ticket).await?;
        self.save(&mut store).await?;
        debug!("created ticket {}", ticket.id);
        Ok(ticket.into())
    }

    /// Update a ticket's status and persist the change.
    pub async fn update_ticket_status(
        &self,
        params: UpdateTicketStatusParams,
    ) -> Result<McpTicket> {
        let status = models::parse_ticket_status(&params.status)?;
        let id = TicketId::from(params.ticket_id);

        let mut store = self.store.write().await;
        let ticket = store.update_ticket_status(&id, status).await?;
        self.save(&mut store).await?;
        Ok(ticket.into())
    }

    /// Delete a ticket and persist the change.
    pub async fn delete_ticket(&self, params: DeleteTicketParams) -> Result<DeleteResponse> {
        let id = TicketId::from(params.ticket_id);

        let mut store = self.store.write().await;
        store.delete_ticket(&id).await?;
        self.save(&mut store).await?;
        Ok(DeleteResponse {
            deleted: id.to_string(),
        })
    }

    /// List all users.
    pub async fn list_users(&self) -> Result<Vec<McpUser>> {
        let store = self.store.read().await;
        let users = store.users().await?;
        Ok(users.into_iter().map(Into::into).collect())
    }

    /// Create a user and persist it.
    pub async fn create_user(&self, params: CreateUserParams) -> Result<McpUser> {
        let new_user = NewUser {
            username: params.username,
            display_name: params.display_name,
            email: params.email,
        };

        let mut store = self.store.write().await;
        let user = store.create_user(new_user).await?;
        self.save(&mut store).await?;
        debug!("created user {}", user.id);
        Ok(user.into())
    }

    /// List sprints, optionally filtered by status.
    pub async fn list_sprints(&self, params: ListSprintsParams) -> Result<Vec<McpSprint>> {
        let status = params
            .status
            .as_deref()
            .map(models::parse_sprint_status)
            .transpose()?;

        let store = self.store.read().await;
        let sprints = store.sprints().await?;
        drop(store);

        let sprints = query::filter_sprints(sprints, status);
        Ok(sprints.into_iter().map(Into::into).collect())
    }

    /// Create a sprint and persist it.
    pub async fn create_sprint(&self, params: CreateSprintParams) -> Result<McpSprint> {
        let status = params
            .status
            .as_deref()
            .map(models::parse_sprint_status)
            .transpose()?;
        let start_date = parse_date("start_date", params.start_date.as_deref())?;
        let end_date = parse_date("end_date", params.end_date.as_deref())?;

        let new_sprint = NewSprint {
            name: params.name,
            description: params.description,
            status,
            start_date,
            end_date,
            goal: params.goal,
        };

        let mut store = self.store.write().await;
        let sprint = store.create_sprint(new_sprint).await?;
        self.save(&mut store).await?;
        debug!("created sprint {}", sprint.id);
        Ok(sprint.into())
    }

    /// Update a sprint's status and persist the change.
    pub async fn update_sprint_status(
        &self,
        params: UpdateSprintStatusParams,
    ) -> Result<McpSprint> {
        let status = models::parse_sprint_status(&params.status)?;
        let id = SprintId::from(params.sprint_id);

        let mut store = self.store.write().await;
        let sprint = store.update_sprint_status(&id, status).await?;
        self.save(&mut store).await?;
        Ok(sprint.into())
    }
}

fn parse_date(
    field: &'static str,
    value: Option<&str>,
) -> Result<Option<chrono::DateTime<chrono::Utc>>> {
    match value {
        None => Ok(None),
        Some(s) => chrono::DateTime::parse_from_rfc3339(s)
            .map(|d| Some(d.with_timezone(&chrono::Utc)))
            .map_err(|_| crate::error::Error::InvalidArgument {
                field,
                value: s.to_string(),
                valid_values: "an RFC 3339 timestamp, e.g. 2026-03-01T00:00:00Z",
            }),
    }
}
