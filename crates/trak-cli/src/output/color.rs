//! Color and glyph helpers for CLI output.
//!
//! Semantic theme, matching the historical listings:
//!   - Ids:       blue
//!   - todo:      gray, progress: yellow, done: green
//!   - planning:  gray, active: green/blue, completed: blue/green
//!   - Priority glyphs: low ◦, medium ●, high ◉, critical 🔴
//!
//! The `colored` crate honors NO_COLOR and non-tty output on its own.

use colored::Colorize;
use trak::domain::{Priority, SprintStatus, TicketStatus};

/// Colorize a record id.
pub fn id(id: &str) -> String {
    id.blue().to_string()
}

/// Colorize a ticket status, padded to the table column width.
pub fn ticket_status(status: TicketStatus) -> String {
    let text = format!("{:<8}", status.to_string());
    match status {
        TicketStatus::Todo => text.bright_black().to_string(),
        TicketStatus::Progress => text.yellow().to_string(),
        TicketStatus::Done => text.green().to_string(),
    }
}

/// Colorize a sprint status, padded to the table column width.
pub fn sprint_status(status: SprintStatus) -> String {
    let text = format!("{:<10}", status.to_string());
    match status {
        SprintStatus::Planning => text.bright_black().to_string(),
        SprintStatus::Active => text.green().to_string(),
        SprintStatus::Completed => text.blue().to_string(),
    }
}

/// Colorize a sprint status for the detailed listing (no padding).
pub fn sprint_status_inline(status: SprintStatus) -> String {
    let text = status.to_string();
    match status {
        SprintStatus::Planning => text.yellow().to_string(),
        SprintStatus::Active => text.blue().to_string(),
        SprintStatus::Completed => text.green().to_string(),
    }
}

/// Glyph for a ticket priority; a missing priority shows as medium.
pub fn priority_glyph(priority: Option<Priority>) -> &'static str {
    match priority.unwrap_or_default() {
        Priority::Low => "◦",
        Priority::Medium => "●",
        Priority::High => "◉",
        Priority::Critical => "🔴",
    }
}

/// Colorize a username, padded to the table column width.
pub fn username(name: &str) -> String {
    format!("{:<15}", name).green().to_string()
}

/// Yellow notice for empty listings.
pub fn notice(text: &str) -> String {
    text.yellow().to_string()
}

/// Dimmed table header text.
pub fn dim(text: &str) -> String {
    text.dimmed().to_string()
}

/// Bold section header.
pub fn heading(text: &str) -> String {
    text.bold().to_string()
}
