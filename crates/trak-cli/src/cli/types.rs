//! CLI value enums and domain type conversions.

use clap::ValueEnum;

use crate::version::Bump;
use trak::domain::{SprintStatus, TicketStatus};
use trak::query::{SortKey, SortOrder};

/// Which collection to list.
///
/// Not a clap value enum: `list` takes the entity as a free string so an
/// unrecognized value falls back to the combined task and bug listing
/// instead of a usage error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityArg {
    /// Task tickets
    Tasks,
    /// Bug tickets
    Bugs,
    /// Sprints
    Sprints,
    /// Users
    Users,
}

impl EntityArg {
    /// Recognize an entity argument, accepting singular and plural forms.
    /// Returns `None` for anything else; the caller treats that as the
    /// combined listing.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "tasks" | "task" => Some(Self::Tasks),
            "bugs" | "bug" => Some(Self::Bugs),
            "sprints" | "sprint" => Some(Self::Sprints),
            "users" | "user" => Some(Self::Users),
            _ => None,
        }
    }
}

/// Ticket status for CLI arguments
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TicketStatusArg {
    /// Not started
    Todo,
    /// Currently being worked on
    Progress,
    /// Completed
    Done,
}

impl From<TicketStatusArg> for TicketStatus {
    fn from(arg: TicketStatusArg) -> Self {
        match arg {
            TicketStatusArg::Todo => Self::Todo,
            TicketStatusArg::Progress => Self::Progress,
            TicketStatusArg::Done => Self::Done,
        }
    }
}

/// Sprint status for CLI arguments
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SprintStatusArg {
    /// Being planned
    Planning,
    /// Currently running
    Active,
    /// Finished
    Completed,
}

impl From<SprintStatusArg> for SprintStatus {
    fn from(arg: SprintStatusArg) -> Self {
        match arg {
            SprintStatusArg::Planning => Self::Planning,
            SprintStatusArg::Active => Self::Active,
            SprintStatusArg::Completed => Self::Completed,
        }
    }
}

/// Sort key for the list command
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKeyArg {
    /// Case-insensitive title
    Title,
    /// Workflow status
    Status,
    /// Priority rank
    Priority,
    /// Creation date
    Created,
    /// Last update (default)
    #[default]
    Updated,
}

impl From<SortKeyArg> for SortKey {
    fn from(arg: SortKeyArg) -> Self {
        match arg {
            SortKeyArg::Title => Self::Title,
            SortKeyArg::Status => Self::Status,
            SortKeyArg::Priority => Self::Priority,
            SortKeyArg::Created => Self::Created,
            SortKeyArg::Updated => Self::Updated,
        }
    }
}

/// Sort direction for the list command
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrderArg {
    /// Smallest first
    Asc,
    /// Largest first (default)
    #[default]
    Desc,
}

impl From<SortOrderArg> for SortOrder {
    fn from(arg: SortOrderArg) -> Self {
        match arg {
            SortOrderArg::Asc => Self::Asc,
            SortOrderArg::Desc => Self::Desc,
        }
    }
}

/// Output format for listings
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormatArg {
    /// Human-readable colored table (default)
    #[default]
    Table,
    /// Serialized records, one JSON array
    Json,
}

/// Version component for the version command
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BumpArg {
    /// Increment the patch component
    Patch,
    /// Increment the minor component
    Minor,
    /// Increment the major component
    Major,
}

impl From<BumpArg> for Bump {
    fn from(arg: BumpArg) -> Self {
        match arg {
            BumpArg::Patch => Self::Patch,
            BumpArg::Minor => Self::Minor,
            BumpArg::Major => Self::Major,
        }
    }
}
