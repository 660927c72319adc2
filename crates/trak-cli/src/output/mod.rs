//! Table rendering for CLI listings.
//!
//! Row layouts follow the historical CLI exactly: blue ids, status padded to
//! a fixed column, a priority glyph, then the title.

pub mod color;

use trak::domain::{Sprint, Ticket, User};

/// One ticket table row.
pub fn format_ticket(ticket: &Ticket) -> String {
    format!(
        "{} {} {} {}",
        color::id(ticket.id.as_str()),
        color::ticket_status(ticket.status),
        color::priority_glyph(ticket.priority),
        ticket.title
    )
}

/// One sprint table row.
pub fn format_sprint(sprint: &Sprint) -> String {
    format!(
        "{} {} {}",
        color::id(sprint.id.as_str()),
        color::sprint_status(sprint.status),
        sprint.name
    )
}

/// One user table row.
pub fn format_user(user: &User) -> String {
    format!(
        "{} {} {}",
        color::id(user.id.as_str()),
        color::username(&user.username),
        user.display_name
    )
}

/// Print a ticket section: bold header, dimmed column names, rows.
pub fn print_ticket_section(heading: &str, tickets: &[Ticket]) {
    println!("{}", color::heading(&format!("\n{} ({})", heading, tickets.len())));
    println!(
        "{}",
        color::dim(&format!("{:<12}{:<10}PRI TITLE", "ID", "STATUS"))
    );
    println!("{}", color::dim(&"─".repeat(60)));
    for ticket in tickets {
        println!("{}", format_ticket(ticket));
    }
}

/// Print a sprint section.
pub fn print_sprint_section(sprints: &[Sprint]) {
    println!(
        "{}",
        color::heading(&format!("\n🏃 Sprints ({})", sprints.len()))
    );
    println!(
        "{}",
        color::dim(&format!("{:<12}{:<12}NAME", "ID", "STATUS"))
    );
    println!("{}", color::dim(&"─".repeat(50)));
    for sprint in sprints {
        println!("{}", format_sprint(sprint));
    }
}

/// Print a user section.
pub fn print_user_section(users: &[User]) {
    println!("{}", color::heading(&format!("\n👥 Users ({})", users.len())));
    println!(
        "{}",
        color::dim(&format!("{:<12}{:<17}DISPLAY NAME", "ID", "USERNAME"))
    );
    println!("{}", color::dim(&"─".repeat(50)));
    for user in users {
        println!("{}", format_user(user));
    }
}

/// Print the detailed multi-line sprint listing used by `trak sprints`.
pub fn print_sprint_details(sprint: &Sprint) {
    println!("{}", color::heading(&sprint.name));
    println!("{}", color::dim(&format!("  ID: {}", sprint.id)));
    println!(
        "{}{}",
        color::dim("  Status: "),
        color::sprint_status_inline(sprint.status)
    );
    if let Some(description) = &sprint.description {
        println!("{}", color::dim(&format!("  Description: {}", description)));
    }
    if let Some(goal) = &sprint.goal {
        println!("{}", color::dim(&format!("  Goal: {}", goal)));
    }
    println!(
        "{}",
        color::dim(&format!(
            "  Created: {}",
            sprint.created_at.format("%Y-%m-%d")
        ))
    );
    if let Some(start) = sprint.start_date {
        println!(
            "{}",
            color::dim(&format!("  Start Date: {}", start.format("%Y-%m-%d")))
        );
    }
    if let Some(end) = sprint.end_date {
        println!(
            "{}",
            color::dim(&format!("  End Date: {}", end.format("%Y-%m-%d")))
        );
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use trak::domain::{Priority, TicketId, TicketStatus, TicketType};

    fn sample_ticket() -> Ticket {
        let now = Utc::now();
        Ticket {
            id: TicketId::new("trak-a3f8"),
            ticket_type: TicketType::Task,
            title: "Render me".to_string(),
            description: None,
            status: TicketStatus::Progress,
            assignee: None,
            sprint: None,
            estimate: None,
            labels: vec![],
            priority: Some(Priority::Critical),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn ticket_row_contains_id_status_glyph_and_title() {
        colored::control::set_override(false);
        let row = format_ticket(&sample_ticket());
        assert!(row.contains("trak-a3f8"));
        assert!(row.contains("progress"));
        assert!(row.contains("🔴"));
        assert!(row.ends_with("Render me"));
        colored::control::unset_override();
    }

    #[test]
    fn missing_priority_renders_the_medium_glyph() {
        let mut ticket = sample_ticket();
        ticket.priority = None;
        colored::control::set_override(false);
        let row = format_ticket(&ticket);
        assert!(row.contains('●'));
        colored::control::unset_override();
    }
}
