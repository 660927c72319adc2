//! Pure filtering and sorting over ticket and sprint collections.
//!
//! No I/O happens here; callers fetch records from the store and run them
//! through these functions before rendering.

use crate::domain::{SprintStatus, TicketStatus};
use crate::{Sprint, Ticket};

/// Criteria for narrowing a ticket listing. Every present field must match
/// (logical AND); an absent field imposes no constraint.
#[derive(Debug, Clone, Default)]
pub struct TicketFilter {
    /// Exact status match
    pub status: Option<TicketStatus>,

    /// Exact assignee id match
    pub assignee: Option<String>,

    /// Exact sprint id match
    pub sprint: Option<String>,

    /// Case-insensitive substring search over title, description, and id
    pub search: Option<String>,
}

impl TicketFilter {
    /// True when no criteria are set.
    pub fn is_empty(&self) -> bool {
        self.status.is_none()
            && self.assignee.is_none()
            && self.sprint.is_none()
            && self.search.is_none()
    }

    fn matches(&self, ticket: &Ticket) -> bool {
        if let Some(status) = self.status {
            if ticket.status != status {
                return false;
            }
        }
        if let Some(assignee) = &self.assignee {
            if ticket.assignee.as_ref().map(|a| a.as_str()) != Some(assignee.as_str()) {
                return false;
            }
        }
        if let Some(sprint) = &self.sprint {
            if ticket.sprint.as_ref().map(|s| s.as_str()) != Some(sprint.as_str()) {
                return false;
            }
        }
        if let Some(search) = &self.search {
            let haystack = format!(
                "{} {} {}",
                ticket.title,
                ticket.description.as_deref().unwrap_or(""),
                ticket.id
            )
            .to_lowercase();
            if !haystack.contains(&search.to_lowercase()) {
                return false;
            }
        }
        true
    }
}

/// Key to sort a ticket listing by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Case-insensitive title comparison
    Title,

    /// Workflow status rank
    Status,

    /// Priority rank (see [`sort_tickets`] for the direction caveat)
    Priority,

    /// Creation timestamp
    Created,

    /// Last-modified timestamp
    #[default]
    Updated,
}

/// Direction of a sort
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Smallest first
    Asc,

    /// Largest first (listing default)
    #[default]
    Desc,
}

/// Keep only the tickets matching every criterion in `filter`, preserving
/// input order.
pub fn filter_tickets(tickets: Vec<Ticket>, filter: &TicketFilter) -> Vec<Ticket> {
    if filter.is_empty() {
        return tickets;
    }
    tickets.into_iter().filter(|t| filter.matches(t)).collect()
}

/// Stable-sort tickets by `key` in `order`. Ties keep their input order.
///
/// The priority key intentionally runs opposite to the other keys: its raw
/// comparator ranks critical first, and `desc` then flips that, so the
/// default `desc` order lists low-priority tickets first and `asc` lists
/// critical first. Historical listings behave this way and downstream
/// tooling depends on it, so the composition is kept as is.
pub fn sort_tickets(tickets: &mut [Ticket], key: SortKey, order: SortOrder) {
    tickets.sort_by(|a, b| {
        let raw = match key {
            SortKey::Title => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
            SortKey::Status => a.status.rank().cmp(&b.status.rank()),
            SortKey::Priority => b.priority_rank().cmp(&a.priority_rank()),
            SortKey::Created => a.created_at.cmp(&b.created_at),
            SortKey::Updated => a.updated_at.cmp(&b.updated_at),
        };
        match order {
            SortOrder::Asc => raw,
            SortOrder::Desc => raw.reverse(),
        }
    });
}

/// Keep only the sprints with the given status, or all of them when no
/// status is requested. Input order is preserved.
pub fn filter_sprints(sprints: Vec<Sprint>, status: Option<SprintStatus>) -> Vec<Sprint> {
    match status {
        None => sprints,
        Some(status) => sprints.into_iter().filter(|s| s.status == status).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Priority, TicketId, TicketType, UserId};
    use chrono::{TimeZone, Utc};

    fn ids(tickets: &[Ticket]) -> Vec<&str> {
        tickets.iter().map(|t| t.id.as_str()).collect()
    }

    fn ticket(id: &str, title: &str) -> Ticket {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        Ticket {
            id: TicketId::new(id),
            ticket_type: TicketType::Task,
            title: title.to_string(),
            description: None,
            status: TicketStatus::Todo,
            assignee: None,
            sprint: None,
            estimate: None,
            labels: vec![],
            priority: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn status_filter_returns_exactly_matching_tickets() {
        let mut t1 = ticket("trak-t1", "First");
        t1.status = TicketStatus::Todo;
        let mut t2 = ticket("trak-t2", "Second");
        t2.status = TicketStatus::Done;
        let mut t3 = ticket("trak-t3", "Third");
        t3.status = TicketStatus::Done;

        let filter = TicketFilter {
            status: Some(TicketStatus::Done),
            ..Default::default()
        };
        let result = filter_tickets(vec![t1, t2, t3], &filter);
        assert_eq!(ids(&result), vec!["trak-t2", "trak-t3"]);

        let no_match = TicketFilter {
            status: Some(TicketStatus::Progress),
            ..Default::default()
        };
        let t = ticket("trak-t4", "Fourth");
        assert!(filter_tickets(vec![t], &no_match).is_empty());
    }

    #[test]
    fn search_is_case_insensitive_over_title() {
        let t = ticket("trak-ab12", "Fix Login Redirect");
        let filter = TicketFilter {
            search: Some("login red".to_string()),
            ..Default::default()
        };
        let result = filter_tickets(vec![t.clone()], &filter);
        assert_eq!(ids(&result), vec!["trak-ab12"]);

        // Any substring of the title matches regardless of case
        let upper = TicketFilter {
            search: Some("FIX LOGIN".to_string()),
            ..Default::default()
        };
        assert_eq!(filter_tickets(vec![t], &upper).len(), 1);
    }

    #[test]
    fn search_covers_description_and_id() {
        let mut t = ticket("trak-zz99", "Short title");
        t.description = Some("The OAuth callback drops the state param".to_string());

        let by_description = TicketFilter {
            search: Some("oauth callback".to_string()),
            ..Default::default()
        };
        assert_eq!(filter_tickets(vec![t.clone()], &by_description).len(), 1);

        let by_id = TicketFilter {
            search: Some("zz99".to_string()),
            ..Default::default()
        };
        assert_eq!(filter_tickets(vec![t], &by_id).len(), 1);
    }

    #[test]
    fn missing_description_contributes_nothing_to_search() {
        let t = ticket("trak-a1b2", "Plain");
        let filter = TicketFilter {
            search: Some("none".to_string()),
            ..Default::default()
        };
        assert!(filter_tickets(vec![t], &filter).is_empty());
    }

    #[test]
    fn filters_combine_with_and_semantics() {
        let mut t1 = ticket("trak-t1", "Alpha");
        t1.status = TicketStatus::Done;
        t1.assignee = Some(UserId::new("user-aa11"));
        let mut t2 = ticket("trak-t2", "Beta");
        t2.status = TicketStatus::Done;

        let filter = TicketFilter {
            status: Some(TicketStatus::Done),
            assignee: Some("user-aa11".to_string()),
            ..Default::default()
        };
        let result = filter_tickets(vec![t1, t2], &filter);
        assert_eq!(ids(&result), vec!["trak-t1"]);
    }

    #[test]
    fn title_sort_asc_is_non_decreasing_and_desc_reverses() {
        let mut tickets = vec![
            ticket("trak-t1", "cherry"),
            ticket("trak-t2", "Apple"),
            ticket("trak-t3", "banana"),
        ];
        sort_tickets(&mut tickets, SortKey::Title, SortOrder::Asc);
        assert_eq!(ids(&tickets), vec!["trak-t2", "trak-t3", "trak-t1"]);

        let lowered: Vec<String> = tickets.iter().map(|t| t.title.to_lowercase()).collect();
        let mut expected = lowered.clone();
        expected.sort();
        assert_eq!(lowered, expected);

        sort_tickets(&mut tickets, SortKey::Title, SortOrder::Desc);
        assert_eq!(ids(&tickets), vec!["trak-t1", "trak-t3", "trak-t2"]);
    }

    #[test]
    fn sort_is_stable_on_equal_keys() {
        let mut tickets = vec![
            ticket("trak-t1", "same"),
            ticket("trak-t2", "same"),
            ticket("trak-t3", "same"),
        ];
        sort_tickets(&mut tickets, SortKey::Title, SortOrder::Asc);
        assert_eq!(ids(&tickets), vec!["trak-t1", "trak-t2", "trak-t3"]);

        sort_tickets(&mut tickets, SortKey::Status, SortOrder::Desc);
        assert_eq!(ids(&tickets), vec!["trak-t1", "trak-t2", "trak-t3"]);
    }

    #[test]
    fn status_sort_follows_workflow_rank() {
        let mut t1 = ticket("trak-t1", "a");
        t1.status = TicketStatus::Done;
        let mut t2 = ticket("trak-t2", "b");
        t2.status = TicketStatus::Todo;
        let mut t3 = ticket("trak-t3", "c");
        t3.status = TicketStatus::Progress;

        let mut tickets = vec![t1, t2, t3];
        sort_tickets(&mut tickets, SortKey::Status, SortOrder::Asc);
        assert_eq!(ids(&tickets), vec!["trak-t2", "trak-t3", "trak-t1"]);
    }

    // Pins the historical priority direction: desc lists low first, asc
    // lists critical first. Changing this is a behavior break for every
    // consumer of the default listing; any deliberate fix must update this
    // test alongside.
    #[test]
    fn priority_sort_direction_matches_historical_listings() {
        let mut t1 = ticket("trak-t1", "a");
        t1.priority = Some(Priority::Critical);
        let mut t2 = ticket("trak-t2", "b");
        t2.priority = Some(Priority::Low);
        let mut t3 = ticket("trak-t3", "c");
        t3.priority = Some(Priority::High);

        let mut tickets = vec![t1.clone(), t2.clone(), t3.clone()];
        sort_tickets(&mut tickets, SortKey::Priority, SortOrder::Desc);
        assert_eq!(ids(&tickets), vec!["trak-t2", "trak-t3", "trak-t1"]);

        let mut tickets = vec![t1, t2, t3];
        sort_tickets(&mut tickets, SortKey::Priority, SortOrder::Asc);
        assert_eq!(ids(&tickets), vec!["trak-t1", "trak-t3", "trak-t2"]);
    }

    #[test]
    fn missing_priority_sorts_as_medium() {
        let mut t1 = ticket("trak-t1", "a");
        t1.priority = Some(Priority::Low);
        let t2 = ticket("trak-t2", "b"); // no priority
        let mut t3 = ticket("trak-t3", "c");
        t3.priority = Some(Priority::High);

        let mut tickets = vec![t1, t2, t3];
        sort_tickets(&mut tickets, SortKey::Priority, SortOrder::Desc);
        assert_eq!(ids(&tickets), vec!["trak-t1", "trak-t2", "trak-t3"]);
    }

    #[test]
    fn scenario_status_filter_and_updated_desc() {
        let mut t1 = ticket("T1", "first");
        t1.status = TicketStatus::Todo;
        t1.priority = Some(Priority::Low);
        t1.updated_at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let mut t2 = ticket("T2", "second");
        t2.status = TicketStatus::Done;
        t2.priority = Some(Priority::Critical);
        t2.updated_at = Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap();

        let filter = TicketFilter {
            status: Some(TicketStatus::Done),
            ..Default::default()
        };
        let filtered = filter_tickets(vec![t1.clone(), t2.clone()], &filter);
        assert_eq!(ids(&filtered), vec!["T2"]);

        let mut all = vec![t1, t2];
        sort_tickets(&mut all, SortKey::Updated, SortOrder::Desc);
        assert_eq!(ids(&all), vec!["T2", "T1"]);
    }

    #[test]
    fn scenario_sprint_status_filter() {
        use crate::domain::SprintId;

        let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let sprint = |id: &str, status: SprintStatus| Sprint {
            id: SprintId::new(id),
            name: id.to_string(),
            description: None,
            status,
            start_date: None,
            end_date: None,
            goal: None,
            created_at: now,
            updated_at: now,
        };

        let sprints = vec![
            sprint("S1", SprintStatus::Planning),
            sprint("S2", SprintStatus::Active),
        ];
        let active = filter_sprints(sprints, Some(SprintStatus::Active));
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id.as_str(), "S2");
    }

    #[test]
    fn empty_filter_passes_everything_through_unchanged() {
        let tickets = vec![ticket("trak-t1", "a"), ticket("trak-t2", "b")];
        let result = filter_tickets(tickets, &TicketFilter::default());
        assert_eq!(ids(&result), vec!["trak-t1", "trak-t2"]);
    }
}
