//! Command execution functions.
//!
//! Each function takes parsed arguments plus the application context and
//! performs one command. Listing commands pull full collections from the
//! store and run them through the pure query layer before rendering.

use anyhow::Result;

use crate::app::App;
use crate::output::{self, color};
use crate::version::bump_version;
use trak::domain::{SprintStatus, Ticket, TicketType};
use trak::query::{self, TicketFilter};
use trak::workspace;

use super::args::{InitArgs, ListArgs, SprintsArgs, VersionArgs};
use super::types::{EntityArg, FormatArg};

/// Execute the `init` command.
pub async fn execute_init(args: &InitArgs) -> Result<()> {
    let cwd = std::env::current_dir()?;
    let result = workspace::init(&cwd, args.prefix.as_deref()).await?;

    if !args.quiet {
        println!(
            "Initialized trak workspace in {}",
            result.trak_dir.display()
        );
        println!("Ticket prefix: {}", result.prefix);
    }
    Ok(())
}

fn ticket_filter(args: &ListArgs) -> TicketFilter {
    TicketFilter {
        status: args.status.map(Into::into),
        assignee: args.assignee.clone(),
        sprint: args.sprint.clone(),
        search: args.search.clone(),
    }
}

async fn filtered_tickets(app: &App, args: &ListArgs, ticket_type: TicketType) -> Result<Vec<Ticket>> {
    let tickets = app.store().tickets_by_type(ticket_type).await?;
    let mut tickets = query::filter_tickets(tickets, &ticket_filter(args));
    query::sort_tickets(&mut tickets, args.sort_by.into(), args.order.into());
    Ok(tickets)
}

/// Execute the `list` command.
///
/// An omitted or unrecognized entity argument produces the combined task
/// and bug listing, grouped by type.
pub async fn execute_list(app: &App, args: &ListArgs) -> Result<()> {
    match args.entity.as_deref().and_then(EntityArg::parse) {
        Some(EntityArg::Tasks) => {
            let tickets = filtered_tickets(app, args, TicketType::Task).await?;
            if args.format == FormatArg::Json {
                println!("{}", serde_json::to_string_pretty(&tickets)?);
            } else if tickets.is_empty() {
                println!("{}", color::notice("No tasks found"));
            } else {
                output::print_ticket_section("📋 Tasks", &tickets);
                println!();
            }
        }
        Some(EntityArg::Bugs) => {
            let tickets = filtered_tickets(app, args, TicketType::Bug).await?;
            if args.format == FormatArg::Json {
                println!("{}", serde_json::to_string_pretty(&tickets)?);
            } else if tickets.is_empty() {
                println!("{}", color::notice("No bugs found"));
            } else {
                output::print_ticket_section("🐛 Bugs", &tickets);
                println!();
            }
        }
        Some(EntityArg::Sprints) => {
            let sprints = app.store().sprints().await?;
            if args.format == FormatArg::Json {
                println!("{}", serde_json::to_string_pretty(&sprints)?);
            } else if sprints.is_empty() {
                println!("{}", color::notice("No sprints found"));
            } else {
                output::print_sprint_section(&sprints);
                println!();
            }
        }
        Some(EntityArg::Users) => {
            let users = app.store().users().await?;
            if args.format == FormatArg::Json {
                println!("{}", serde_json::to_string_pretty(&users)?);
            } else if users.is_empty() {
                println!("{}", color::notice("No users found"));
            } else {
                output::print_user_section(&users);
                println!();
            }
        }
        None => {
            // Combined listing, grouped by type after a shared filter+sort
            let mut tickets = app.store().tickets_by_type(TicketType::Task).await?;
            tickets.extend(app.store().tickets_by_type(TicketType::Bug).await?);
            let mut tickets = query::filter_tickets(tickets, &ticket_filter(args));
            query::sort_tickets(&mut tickets, args.sort_by.into(), args.order.into());

            if args.format == FormatArg::Json {
                println!("{}", serde_json::to_string_pretty(&tickets)?);
                return Ok(());
            }
            if tickets.is_empty() {
                println!("{}", color::notice("No tickets found"));
                return Ok(());
            }

            let tasks: Vec<Ticket> = tickets
                .iter()
                .filter(|t| t.ticket_type == TicketType::Task)
                .cloned()
                .collect();
            let bugs: Vec<Ticket> = tickets
                .iter()
                .filter(|t| t.ticket_type == TicketType::Bug)
                .cloned()
                .collect();

            if !tasks.is_empty() {
                output::print_ticket_section("📋 Tasks", &tasks);
            }
            if !bugs.is_empty() {
                output::print_ticket_section("🐛 Bugs", &bugs);
            }
            println!();
        }
    }
    Ok(())
}

/// Execute the `sprints` command (detailed listing).
pub async fn execute_sprints(app: &App, args: &SprintsArgs) -> Result<()> {
    let sprints = app.store().sprints().await?;
    let status = args.status.map(Into::into);
    let sprints = query::filter_sprints(sprints, status);

    if sprints.is_empty() {
        let status_text = status
            .map(|s| format!(" with status \"{}\"", s))
            .unwrap_or_default();
        println!("{}", color::notice(&format!("No sprints found{}.", status_text)));
        return Ok(());
    }

    println!("{}", color::heading(&sprints_heading(sprints.len(), status)));
    println!();
    for sprint in &sprints {
        output::print_sprint_details(sprint);
    }
    Ok(())
}

/// Heading for the detailed sprint listing; names the active status filter
/// when one was applied.
fn sprints_heading(count: usize, status: Option<SprintStatus>) -> String {
    let plural = if count == 1 { "" } else { "s" };
    match status {
        Some(status) => format!("Found {} sprint{} ({}):", count, plural, status),
        None => format!("Found {} sprint{}:", count, plural),
    }
}

/// Execute the `version` command.
pub async fn execute_version(app: &App, args: &VersionArgs) -> Result<()> {
    let current = app.config().version.clone();

    let Some(bump) = args.bump else {
        println!("Current version: {}", current);
        return Ok(());
    };

    let next = bump_version(&current, bump.into());
    println!("Version bump: {} → {}", current, next);

    let mut config = app.config().clone();
    config.version = next;
    app.save_config(&config).await?;
    println!("{}", color::dim("Updated .trak/config.yaml"));
    Ok(())
}

/// Execute the `mcp` command: run the MCP server over stdio until the
/// client disconnects.
pub async fn execute_mcp() -> Result<()> {
    let cwd = std::env::current_dir()?;
    trak_mcp::run_stdio_server(&cwd).await?;
    Ok(())
}
