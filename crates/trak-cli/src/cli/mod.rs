//! CLI argument parsing and command dispatch.
//!
//! # Commands
//!
//! - `init`: Initialize a new trak workspace
//! - `list`: List tickets, sprints, or users with filters and sorting
//! - `sprints`: Detailed sprint listing
//! - `version`: Show or bump the workspace version
//! - `mcp`: Run the MCP server over stdio
//!
//! # Example
//!
//! ```bash
//! trak init --prefix myteam
//! trak list tasks --status progress --sort-by priority
//! trak list bugs -s "login" --format json
//! trak sprints --status active
//! ```

mod args;
mod execute;
mod types;

use anyhow::Result;
use clap::{Parser, Subcommand};

pub use args::{InitArgs, ListArgs, SprintsArgs, VersionArgs};
pub use types::{
    BumpArg, EntityArg, FormatArg, SortKeyArg, SortOrderArg, SprintStatusArg, TicketStatusArg,
};

/// Trak - a file-backed ticket tracker
///
/// Track tasks, bugs, sprints, and users using JSONL storage. Records live
/// in `.trak/` for easy version control integration.
#[derive(Parser, Debug)]
#[command(name = "trak")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Initialize a new trak workspace
    ///
    /// Creates the `.trak/` directory with configuration and empty data
    /// files. Run this once in your project root.
    Init(InitArgs),

    /// List tickets, sprints, or users
    ///
    /// With no entity argument (or an unrecognized one), shows all tickets
    /// grouped into tasks and bugs. Filters combine with AND; the default
    /// sort is most recently updated first.
    List(ListArgs),

    /// Show sprints in detail
    ///
    /// Multi-line listing with description, goal, and dates, optionally
    /// narrowed to one status.
    Sprints(SprintsArgs),

    /// Show or bump the workspace version
    Version(VersionArgs),

    /// Run the MCP server over stdio
    ///
    /// Exposes the workspace to MCP clients until the client disconnects.
    Mcp,
}

impl Cli {
    /// Parse CLI arguments from the command line.
    pub fn parse_args() -> Self {
        <Self as Parser>::parse()
    }

    /// Parse CLI arguments from an iterator (for testing).
    pub fn try_parse_from<I, T>(iter: I) -> std::result::Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(iter)
    }

    /// Execute the parsed command.
    pub async fn execute(&self) -> Result<()> {
        use crate::app::App;

        match &self.command {
            Some(Commands::Init(args)) => execute::execute_init(args).await,
            Some(Commands::List(args)) => {
                let app = App::from_directory(&std::env::current_dir()?).await?;
                execute::execute_list(&app, args).await
            }
            Some(Commands::Sprints(args)) => {
                let app = App::from_directory(&std::env::current_dir()?).await?;
                execute::execute_sprints(&app, args).await
            }
            Some(Commands::Version(args)) => {
                let app = App::from_directory(&std::env::current_dir()?).await?;
                execute::execute_version(&app, args).await
            }
            Some(Commands::Mcp) => execute::execute_mcp().await,
            None => {
                println!("Trak ticket tracker");
                println!("Use --help for more information");
                Ok(())
            }
        }
    }
}
