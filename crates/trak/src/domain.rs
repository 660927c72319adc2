//! Domain types for ticket tracking.
//!
//! Records serialize with camelCase field names so the on-disk shape matches
//! the historical data files (`createdAt`, `updatedAt`, etc.).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum allowed ticket title length
pub const MAX_TITLE_LENGTH: usize = 200;

macro_rules! id_newtype {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            /// Create a new identifier from anything string-like.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// The identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }
    };
}

id_newtype!(
    /// Unique identifier for a ticket
    TicketId
);
id_newtype!(
    /// Unique identifier for a sprint
    SprintId
);
id_newtype!(
    /// Unique identifier for a user
    UserId
);

/// Kind of ticket being tracked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TicketType {
    /// A unit of planned work
    Task,

    /// A defect report
    Bug,
}

impl fmt::Display for TicketType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Task => write!(f, "task"),
            Self::Bug => write!(f, "bug"),
        }
    }
}

/// Workflow status of a ticket.
///
/// Variants are declared in workflow order; [`TicketStatus::rank`] exposes
/// that order for sorting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TicketStatus {
    /// Not started
    Todo,

    /// Currently being worked on
    Progress,

    /// Completed
    Done,
}

impl TicketStatus {
    /// Fixed sort rank: `todo=0 < progress=1 < done=2`.
    pub const fn rank(self) -> u8 {
        match self {
            Self::Todo => 0,
            Self::Progress => 1,
            Self::Done => 2,
        }
    }
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Todo => write!(f, "todo"),
            Self::Progress => write!(f, "progress"),
            Self::Done => write!(f, "done"),
        }
    }
}

/// Ticket priority, lowest to highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Can wait
    Low,

    /// Normal priority; also the rank assumed when a ticket carries none
    #[default]
    Medium,

    /// Should be picked up soon
    High,

    /// Drop everything
    Critical,
}

impl Priority {
    /// Fixed sort rank: `low=0 < medium=1 < high=2 < critical=3`.
    pub const fn rank(self) -> u8 {
        match self {
            Self::Low => 0,
            Self::Medium => 1,
            Self::High => 2,
            Self::Critical => 3,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
            Self::Critical => write!(f, "critical"),
        }
    }
}

/// Lifecycle status of a sprint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SprintStatus {
    /// Being planned, not yet started
    Planning,

    /// Currently running
    Active,

    /// Finished
    Completed,
}

impl fmt::Display for SprintStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Planning => write!(f, "planning"),
            Self::Active => write!(f, "active"),
            Self::Completed => write!(f, "completed"),
        }
    }
}

/// A task or bug record tracked by the system
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    /// Unique identifier
    pub id: TicketId,

    /// Ticket kind (task or bug)
    #[serde(rename = "type")]
    pub ticket_type: TicketType,

    /// Short summary
    pub title: String,

    /// Longer description (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Workflow status
    pub status: TicketStatus,

    /// Weak reference to the assigned user; never checked for existence
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<UserId>,

    /// Weak reference to the containing sprint; never checked for existence
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sprint: Option<SprintId>,

    /// Effort estimate in story points
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimate: Option<f64>,

    /// Free-form labels
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<String>,

    /// Priority; absent ranks as [`Priority::Medium`]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,

    /// Creation timestamp, immutable after creation
    pub created_at: DateTime<Utc>,

    /// Refreshed by every mutation
    pub updated_at: DateTime<Utc>,
}

impl Ticket {
    /// The priority rank used for sorting, defaulting absent to medium.
    pub fn priority_rank(&self) -> u8 {
        self.priority.unwrap_or_default().rank()
    }
}

/// A time-boxed grouping of tickets
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sprint {
    /// Unique identifier
    pub id: SprintId,

    /// Sprint name
    pub name: String,

    /// Longer description (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Lifecycle status
    pub status: SprintStatus,

    /// Planned start (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<DateTime<Utc>>,

    /// Planned end (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,

    /// Sprint goal (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal: Option<String>,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Refreshed by every mutation
    pub updated_at: DateTime<Utc>,
}

/// A user that tickets can reference as assignee
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique identifier
    pub id: UserId,

    /// Unique login name
    pub username: String,

    /// Name shown in listings
    pub display_name: String,

    /// Email address (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Refreshed by every mutation
    pub updated_at: DateTime<Utc>,
}

/// Data for creating a new ticket
#[derive(Debug, Clone)]
pub struct NewTicket {
    /// Ticket kind
    pub ticket_type: TicketType,

    /// Short summary (required, non-empty)
    pub title: String,

    /// Longer description
    pub description: Option<String>,

    /// Assignee reference
    pub assignee: Option<UserId>,

    /// Sprint reference
    pub sprint: Option<SprintId>,

    /// Effort estimate
    pub estimate: Option<f64>,

    /// Free-form labels
    pub labels: Vec<String>,

    /// Priority
    pub priority: Option<Priority>,
}

impl NewTicket {
    /// Validate required fields before the store accepts the ticket.
    pub fn validate(&self) -> Result<(), String> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err("Ticket title cannot be empty".to_string());
        }
        if title.chars().count() > MAX_TITLE_LENGTH {
            return Err(format!(
                "Ticket title cannot exceed {} characters",
                MAX_TITLE_LENGTH
            ));
        }
        if let Some(estimate) = self.estimate {
            if !estimate.is_finite() || estimate < 0.0 {
                return Err("Estimate must be a non-negative number".to_string());
            }
        }
        Ok(())
    }
}

/// Data for creating a new sprint
#[derive(Debug, Clone)]
pub struct NewSprint {
    /// Sprint name (required, non-empty)
    pub name: String,

    /// Longer description
    pub description: Option<String>,

    /// Initial status; defaults to planning when absent
    pub status: Option<SprintStatus>,

    /// Planned start
    pub start_date: Option<DateTime<Utc>>,

    /// Planned end
    pub end_date: Option<DateTime<Utc>>,

    /// Sprint goal
    pub goal: Option<String>,
}

impl NewSprint {
    /// Validate required fields before the store accepts the sprint.
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Sprint name cannot be empty".to_string());
        }
        Ok(())
    }
}

/// Data for creating a new user
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Unique login name (required)
    pub username: String,

    /// Name shown in listings (required)
    pub display_name: String,

    /// Email address
    pub email: Option<String>,
}

impl NewUser {
    /// Validate required fields before the store accepts the user.
    ///
    /// Uniqueness of the username is checked by the store, which owns the
    /// collection; this only validates shape.
    pub fn validate(&self) -> Result<(), String> {
        let username = self.username.trim();
        if username.is_empty() {
            return Err("Username cannot be empty".to_string());
        }
        if !username
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.')
        {
            return Err(
                "Username may only contain alphanumerics, '-', '_', and '.'".to_string(),
            );
        }
        if self.display_name.trim().is_empty() {
            return Err("Display name cannot be empty".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_ranks_are_workflow_ordered() {
        assert!(TicketStatus::Todo.rank() < TicketStatus::Progress.rank());
        assert!(TicketStatus::Progress.rank() < TicketStatus::Done.rank());
    }

    #[test]
    fn priority_ranks_are_ordered() {
        assert!(Priority::Low.rank() < Priority::Medium.rank());
        assert!(Priority::Medium.rank() < Priority::High.rank());
        assert!(Priority::High.rank() < Priority::Critical.rank());
    }

    #[test]
    fn missing_priority_ranks_as_medium() {
        assert_eq!(Priority::default(), Priority::Medium);
    }

    #[test]
    fn ticket_serializes_with_historical_field_names() {
        let ticket = Ticket {
            id: TicketId::new("tkt-a1b2"),
            ticket_type: TicketType::Bug,
            title: "Broken login".to_string(),
            description: None,
            status: TicketStatus::Todo,
            assignee: Some(UserId::new("user-x9")),
            sprint: None,
            estimate: Some(3.0),
            labels: vec!["auth".to_string()],
            priority: Some(Priority::High),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let json = serde_json::to_value(&ticket).unwrap();
        assert_eq!(json["type"], "bug");
        assert_eq!(json["status"], "todo");
        assert_eq!(json["priority"], "high");
        assert!(json["createdAt"].is_string());
        assert!(json["updatedAt"].is_string());
        // Absent optionals are omitted entirely, like the historical records
        assert!(json.get("description").is_none());
        assert!(json.get("sprint").is_none());
    }

    #[test]
    fn new_ticket_validation() {
        let mut ticket = NewTicket {
            ticket_type: TicketType::Task,
            title: "Write docs".to_string(),
            description: None,
            assignee: None,
            sprint: None,
            estimate: None,
            labels: vec![],
            priority: None,
        };
        assert!(ticket.validate().is_ok());

        ticket.title = "   ".to_string();
        assert!(ticket.validate().is_err());

        ticket.title = "x".repeat(MAX_TITLE_LENGTH + 1);
        assert!(ticket.validate().is_err());

        ticket.title = "ok".to_string();
        ticket.estimate = Some(-1.0);
        assert!(ticket.validate().is_err());
    }

    #[test]
    fn title_length_counts_characters_not_bytes() {
        let mut ticket = NewTicket {
            ticket_type: TicketType::Task,
            title: "é".repeat(150),
            description: None,
            assignee: None,
            sprint: None,
            estimate: None,
            labels: vec![],
            priority: None,
        };
        // 150 characters, 300 bytes
        assert!(ticket.validate().is_ok());

        ticket.title = "é".repeat(MAX_TITLE_LENGTH + 1);
        assert!(ticket.validate().is_err());
    }

    #[test]
    fn new_user_validation() {
        let user = NewUser {
            username: "alice.b".to_string(),
            display_name: "Alice B".to_string(),
            email: None,
        };
        assert!(user.validate().is_ok());

        let bad = NewUser {
            username: "alice b".to_string(),
            display_name: "Alice".to_string(),
            email: None,
        };
        assert!(bad.validate().is_err());

        let no_display = NewUser {
            username: "alice".to_string(),
            display_name: " ".to_string(),
            email: None,
        };
        assert!(no_display.validate().is_err());
    }
}
