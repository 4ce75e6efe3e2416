//! Starting ticket set for a fresh session.
//!
//! The built-in seed holds fifteen tickets, five per status, ordered Open,
//! In Progress, Closed with ids 1 through 15. A JSON file with the same
//! shape can replace it via the project config.

use crate::model::{Priority, Status, Ticket, TicketId, UNASSIGNED};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::path::Path;

type SeedRow = (
    u32,
    &'static str,
    &'static str,
    Status,
    Priority,
    &'static str,
    u32,
);

#[rustfmt::skip]
const SEED: [SeedRow; 15] = [
    (1, "Database connection failing after update", "The primary database fails to connect post-patch.", Status::Open, Priority::High, "Alice", 15),
    (2, "Login button intermittently non-responsive", "Users reporting issues submitting the login form.", Status::Open, Priority::Medium, "Bob", 16),
    (3, "Typo on landing page header", "The word 'Tickets' is misspelled on the hero section.", Status::Open, Priority::Low, UNASSIGNED, 17),
    (4, "API latency spiking during peak hours", "Need to investigate server load during noon.", Status::Open, Priority::High, "Charlie", 18),
    (5, "Need to update footer copyright year", "Change copyright year to 2026.", Status::Open, Priority::Low, "Alice", 19),
    (6, "Implement dark mode feature toggle", "Working on the CSS for the new dark theme.", Status::InProgress, Priority::Medium, "Bob", 20),
    (7, "Refactor ticket filtering logic", "Currently optimizing the store getters for better performance.", Status::InProgress, Priority::High, "Charlie", 21),
    (8, "Add file upload capability to form", "Integrating cloud storage API for attachments.", Status::InProgress, Priority::Medium, "Alice", 22),
    (9, "Update README documentation for deployment", "Adding Vercel instructions to the docs.", Status::InProgress, Priority::Low, "Bob", 23),
    (10, "Design review for new dashboard icons", "Waiting for final icon set approval from design team.", Status::InProgress, Priority::Low, UNASSIGNED, 24),
    (11, "Initial project setup completed", "Vite, Vue, and Pinia installed and configured.", Status::Closed, Priority::Low, "Alice", 25),
    (12, "Auth system implemented and tested", "Login/Logout and route protection verified.", Status::Closed, Priority::Medium, "Charlie", 26),
    (13, "Initial dashboard page built", "Summary statistics display verified.", Status::Closed, Priority::Medium, "Bob", 27),
    (14, "Fixed CSS grid layout issue", "Resolved minor bug in card spacing on mobile.", Status::Closed, Priority::Low, "Alice", 28),
    (15, "Ticket list table finalized", "Filtering and deletion functionality working.", Status::Closed, Priority::Medium, "Charlie", 29),
];

/// The built-in fifteen-ticket seed list.
#[must_use]
pub fn seed_tickets() -> Vec<Ticket> {
    SEED.iter()
        .filter_map(|&(id, title, description, status, priority, assignee, day)| {
            Some(Ticket {
                id: TicketId::new(id)?,
                title: title.to_string(),
                description: description.to_string(),
                status,
                priority,
                assigned_to: assignee.to_string(),
                date_created: NaiveDate::from_ymd_opt(2025, 1, day)?,
            })
        })
        .collect()
}

/// Load a seed list from a JSON array of tickets.
pub fn load_seed_file(path: &Path) -> Result<Vec<Ticket>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let tickets: Vec<Ticket> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    tracing::debug!(path = %path.display(), count = tickets.len(), "loaded seed file");
    Ok(tickets)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_has_fifteen_tickets_in_id_order() {
        let tickets = seed_tickets();
        assert_eq!(tickets.len(), 15);
        let ids: Vec<u32> = tickets.iter().map(|t| t.id.get()).collect();
        assert_eq!(ids, (1..=15).collect::<Vec<_>>());
    }

    #[test]
    fn seed_has_five_per_status_in_blocks() {
        let tickets = seed_tickets();
        for (block, status) in tickets.chunks(5).zip(Status::ALL) {
            assert!(block.iter().all(|t| t.status == status));
        }
    }

    #[test]
    fn seed_dates_run_from_mid_january() {
        let tickets = seed_tickets();
        assert_eq!(
            tickets[0].date_created,
            NaiveDate::from_ymd_opt(2025, 1, 15).unwrap()
        );
        assert_eq!(
            tickets[14].date_created,
            NaiveDate::from_ymd_opt(2025, 1, 29).unwrap()
        );
        assert!(tickets[2].is_unassigned());
    }

    #[test]
    fn seed_file_roundtrips_through_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tickets.json");
        let tickets = seed_tickets();
        std::fs::write(&path, serde_json::to_string(&tickets).unwrap()).unwrap();

        let loaded = load_seed_file(&path).unwrap();
        assert_eq!(loaded, tickets);
    }

    #[test]
    fn seed_file_parse_error_names_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "[{\"id\": 1}]").unwrap();

        let err = load_seed_file(&path).unwrap_err();
        assert!(err.to_string().contains("broken.json"));
    }
}
