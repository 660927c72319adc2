//! MCP parameter and response models.
//!
//! Tool inputs are schemars-derived structs with string-encoded enums so
//! clients never need this crate's types; the parsers below accept any
//! casing. Responses are string-encoded views of the domain records with
//! RFC 3339 timestamps.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::Error;
use trak::domain::{Priority, Sprint, SprintStatus, Ticket, TicketStatus, TicketType, User};

// ============================================================================
// Tool Parameters
// ============================================================================

/// Parameters for the `list_tickets` tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ListTicketsParams {
    /// Ticket kind to list: "task" or "bug".
    #[serde(rename = "type")]
    pub ticket_type: String,

    /// Filter by status: "todo", "progress", or "done".
    pub status: Option<String>,

    /// Filter by assignee user id.
    pub assignee: Option<String>,

    /// Filter by sprint id.
    pub sprint: Option<String>,

    /// Case-insensitive search over title, description, and id.
    pub search: Option<String>,
}

/// Parameters for the `create_ticket` tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CreateTicketParams {
    /// Ticket kind: "task" (default) or "bug".
    #[serde(rename = "type")]
    pub ticket_type: Option<String>,

    /// Ticket title (required, at most 200 characters).
    pub title: String,

    /// Longer description.
    pub description: Option<String>,

    /// Assignee user id.
    pub assignee: Option<String>,

    /// Sprint id.
    pub sprint: Option<String>,

    /// Effort estimate in story points (non-negative).
    pub estimate: Option<f64>,

    /// Free-form labels.
    pub labels: Option<Vec<String>>,

    /// Priority: "low", "medium", "high", or "critical".
    pub priority: Option<String>,
}

/// Parameters for the `update_ticket_status` tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct UpdateTicketStatusParams {
    /// Id of the ticket to update.
    pub ticket_id: String,

    /// New status: "todo", "progress", or "done".
    pub status: String,
}

/// Parameters for the `delete_ticket` tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct DeleteTicketParams {
    /// Id of the ticket to delete.
    pub ticket_id: String,
}

/// Parameters for the `create_user` tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CreateUserParams {
    /// Unique login name.
    pub username: String,

    /// Name shown in listings.
    pub display_name: String,

    /// Email address.
    pub email: Option<String>,
}

/// Parameters for the `list_sprints` tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ListSprintsParams {
    /// Filter by status: "planning", "active", or "completed".
    pub status: Option<String>,
}

/// Parameters for the `create_sprint` tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CreateSprintParams {
    /// Sprint name (required).
    pub name: String,

    /// Longer description.
    pub description: Option<String>,

    /// Initial status: "planning" (default), "active", or "completed".
    pub status: Option<String>,

    /// Planned start date (RFC 3339).
    pub start_date: Option<String>,

    /// Planned end date (RFC 3339).
    pub end_date: Option<String>,

    /// Sprint goal.
    pub goal: Option<String>,
}

/// Parameters for the `update_sprint_status` tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct UpdateSprintStatusParams {
    /// Id of the sprint to update.
    pub sprint_id: String,

    /// New status: "planning", "active", or "completed".
    pub status: String,
}

// ============================================================================
// Responses
// ============================================================================

/// Ticket representation for MCP responses.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct McpTicket {
    /// Unique identifier.
    pub id: String,

    /// Ticket kind ("task" or "bug").
    #[serde(rename = "type")]
    pub ticket_type: String,

    /// Ticket title.
    pub title: String,

    /// Longer description, if any.
    pub description: Option<String>,

    /// Current status.
    pub status: String,

    /// Assignee user id, if any.
    pub assignee: Option<String>,

    /// Sprint id, if any.
    pub sprint: Option<String>,

    /// Effort estimate, if any.
    pub estimate: Option<f64>,

    /// Labels.
    pub labels: Vec<String>,

    /// Priority, if set.
    pub priority: Option<String>,

    /// Creation timestamp (RFC 3339).
    pub created_at: String,

    /// Last update timestamp (RFC 3339).
    pub updated_at: String,
}

impl From<Ticket> for McpTicket {
    fn from(ticket: Ticket) -> Self {
        Self {
            id: ticket.id.to_string(),
            ticket_type: ticket.ticket_type.to_string(),
            title: ticket.title,
            description: ticket.description,
            status: ticket.status.to_string(),
            assignee: ticket.assignee.map(|a| a.to_string()),
            sprint: ticket.sprint.map(|s| s.to_string()),
            estimate: ticket.estimate,
            labels: ticket.labels,
            priority: ticket.priority.map(|p| p.to_string()),
            created_at: ticket.created_at.to_rfc3339(),
            updated_at: ticket.updated_at.to_rfc3339(),
        }
    }
}

/// Sprint representation for MCP responses.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct McpSprint {
    /// Unique identifier.
    pub id: String,

    /// Sprint name.
    pub name: String,

    /// Longer description, if any.
    pub description: Option<String>,

    /// Current status.
    pub status: String,

    /// Planned start (RFC 3339), if any.
    pub start_date: Option<String>,

    /// Planned end (RFC 3339), if any.
    pub end_date: Option<String>,

    /// Sprint goal, if any.
    pub goal: Option<String>,

    /// Creation timestamp (RFC 3339).
    pub created_at: String,

    /// Last update timestamp (RFC 3339).
    pub updated_at: String,
}

impl From<Sprint> for McpSprint {
    fn from(sprint: Sprint) -> Self {
        Self {
            id: sprint.id.to_string(),
            name: sprint.name,
            description: sprint.description,
            status: sprint.status.to_string(),
            start_date: sprint.start_date.map(|d| d.to_rfc3339()),
            end_date: sprint.end_date.map(|d| d.to_rfc3339()),
            goal: sprint.goal,
            created_at: sprint.created_at.to_rfc3339(),
            updated_at: sprint.updated_at.to_rfc3339(),
        }
    }
}

/// User representation for MCP responses.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct McpUser {
    /// Unique identifier.
    pub id: String,

    /// Login name.
    pub username: String,

    /// Name shown in listings.
    pub display_name: String,

    /// Email address, if any.
    pub email: Option<String>,

    /// Creation timestamp (RFC 3339).
    pub created_at: String,

    /// Last update timestamp (RFC 3339).
    pub updated_at: String,
}

impl From<User> for McpUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username,
            display_name: user.display_name,
            email: user.email,
            created_at: user.created_at.to_rfc3339(),
            updated_at: user.updated_at.to_rfc3339(),
        }
    }
}

/// Response for the `delete_ticket` tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DeleteResponse {
    /// The id that was deleted.
    pub deleted: String,
}

// ============================================================================
// Lenient string-to-enum parsers
// ============================================================================

/// Parse a ticket type string, case-insensitively.
pub fn parse_ticket_type(value: &str) -> Result<TicketType, Error> {
    match value.to_lowercase().as_str() {
        "task" => Ok(TicketType::Task),
        "bug" => Ok(TicketType::Bug),
        _ => Err(Error::InvalidArgument {
            field: "type",
            value: value.to_string(),
            valid_values: "task, bug",
        }),
    }
}

/// Parse a ticket status string, case-insensitively.
pub fn parse_ticket_status(value: &str) -> Result<TicketStatus, Error> {
    match value.to_lowercase().as_str() {
        "todo" => Ok(TicketStatus::Todo),
        "progress" => Ok(TicketStatus::Progress),
        "done" => Ok(TicketStatus::Done),
        _ => Err(Error::InvalidArgument {
            field: "status",
            value: value.to_string(),
            valid_values: "todo, progress, done",
        }),
    }
}

/// Parse a sprint status string, case-insensitively.
pub fn parse_sprint_status(value: &str) -> Result<SprintStatus, Error> {
    match value.to_lowercase().as_str() {
        "planning" => Ok(SprintStatus::Planning),
        "active" => Ok(SprintStatus::Active),
        "completed" => Ok(SprintStatus::Completed),
        _ => Err(Error::InvalidArgument {
            field: "status",
            value: value.to_string(),
            valid_values: "planning, active, completed",
        }),
    }
}

/// Parse a priority string, case-insensitively.
pub fn parse_priority(value: &str) -> Result<Priority, Error> {
    match value.to_lowercase().as_str() {
        "low" => Ok(Priority::Low),
        "medium" => Ok(Priority::Medium),
        "high" => Ok(Priority::High),
        "critical" => Ok(Priority::Critical),
        _ => Err(Error::InvalidArgument {
            field: "priority",
            value: value.to_string(),
            valid_values: "low, medium, high, critical",
        }),
    }
}
