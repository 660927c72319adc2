//! CLI argument structs for all commands.

use clap::Parser;

use super::types::{
    BumpArg, FormatArg, SortKeyArg, SortOrderArg, SprintStatusArg, TicketStatusArg,
};

/// Arguments for the `init` command
#[derive(Parser, Debug, Clone)]
pub struct InitArgs {
    /// Ticket ID prefix (e.g. "trak" for "trak-a3f8")
    ///
    /// Must be 2-20 alphanumeric characters.
    #[arg(short, long)]
    pub prefix: Option<String>,

    /// Suppress output messages
    #[arg(short, long)]
    pub quiet: bool,
}

/// Arguments for the `list` command
#[derive(Parser, Debug, Clone)]
pub struct ListArgs {
    /// What to list (tasks, bugs, sprints, users); omitted or unrecognized
    /// values produce the combined task and bug listing
    pub entity: Option<String>,

    /// Filter by status
    #[arg(long, value_enum)]
    pub status: Option<TicketStatusArg>,

    /// Filter by assignee user id
    #[arg(long)]
    pub assignee: Option<String>,

    /// Filter by sprint id
    #[arg(long)]
    pub sprint: Option<String>,

    /// Case-insensitive search over title, description, and id
    #[arg(short = 's', long)]
    pub search: Option<String>,

    /// Sort key
    #[arg(long = "sort-by", value_enum, default_value = "updated")]
    pub sort_by: SortKeyArg,

    /// Sort direction
    #[arg(long, value_enum, default_value = "desc")]
    pub order: SortOrderArg,

    /// Output format
    #[arg(long, value_enum, default_value = "table")]
    pub format: FormatArg,
}

/// Arguments for the `sprints` command
#[derive(Parser, Debug, Clone)]
pub struct SprintsArgs {
    /// Only show sprints with this status
    #[arg(long, value_enum)]
    pub status: Option<SprintStatusArg>,
}

/// Arguments for the `version` command
#[derive(Parser, Debug, Clone)]
pub struct VersionArgs {
    /// Increment the workspace version and rewrite the config
    #[arg(long, value_enum)]
    pub bump: Option<BumpArg>,
}
