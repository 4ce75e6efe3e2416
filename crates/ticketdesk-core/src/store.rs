//! In-memory ticket collection with a status filter.
//!
//! [`TicketStore`] owns an ordered `Vec<Ticket>` plus the active
//! [`StatusFilter`]. Reads never reorder; deletes remove in place and keep
//! survivors in their original order; saves overwrite a whole ticket at its
//! existing position.
//!
//! # Creation vs. update
//!
//! [`TicketStore::save_ticket`] only updates. A ticket whose id is not in the
//! collection is dropped and reported as [`SaveOutcome::Ignored`]. New
//! tickets go through [`TicketStore::insert_ticket`], usually with an id from
//! [`TicketStore::next_id`].

use crate::error::TicketError;
use crate::model::{Status, StatusFilter, Ticket, TicketId};
use crate::seed::seed_tickets;
use serde::Serialize;
use std::collections::HashSet;
use tracing::{debug, info, warn};

/// Result of [`TicketStore::save_ticket`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
#[must_use]
pub enum SaveOutcome {
    /// An existing ticket with the same id was overwritten in place.
    Replaced,
    /// No ticket with that id exists; the collection is unchanged.
    Ignored,
}

/// Per-status ticket counts for the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusSummary {
    pub total: usize,
    pub open: usize,
    pub in_progress: usize,
    pub closed: usize,
}

impl StatusSummary {
    #[must_use]
    pub const fn count(&self, status: Status) -> usize {
        match status {
            Status::Open => self.open,
            Status::InProgress => self.in_progress,
            Status::Closed => self.closed,
        }
    }
}

/// Ordered ticket collection plus the active status filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketStore {
    tickets: Vec<Ticket>,
    filter: StatusFilter,
    version: u64,
}

impl Default for TicketStore {
    fn default() -> Self {
        Self::seeded()
    }
}

impl TicketStore {
    /// Build a store from an initial list, rejecting duplicate ids.
    pub fn new(tickets: Vec<Ticket>) -> Result<Self, TicketError> {
        let mut seen = HashSet::with_capacity(tickets.len());
        for ticket in &tickets {
            if !seen.insert(ticket.id) {
                return Err(TicketError::DuplicateId(ticket.id));
            }
        }
        debug!(count = tickets.len(), "ticket store initialized");
        Ok(Self {
            tickets,
            filter: StatusFilter::All,
            version: 0,
        })
    }

    /// A store holding the built-in seed tickets.
    #[must_use]
    pub fn seeded() -> Self {
        Self {
            tickets: seed_tickets(),
            filter: StatusFilter::All,
            version: 0,
        }
    }

    /// The full collection, unfiltered, in insertion order.
    #[must_use]
    pub fn list(&self) -> &[Ticket] {
        &self.tickets
    }

    /// Tickets visible under the current filter, in insertion order.
    #[must_use]
    pub fn filtered_list(&self) -> Vec<&Ticket> {
        self.tickets
            .iter()
            .filter(|ticket| self.filter.matches(ticket.status))
            .collect()
    }

    #[must_use]
    pub const fn current_filter(&self) -> StatusFilter {
        self.filter
    }

    pub fn set_filter(&mut self, filter: StatusFilter) {
        debug!(from = %self.filter, to = %filter, "filter changed");
        self.filter = filter;
    }

    /// Parse and apply a filter value.
    ///
    /// An unknown value is rejected and the current filter stays in place.
    pub fn set_filter_str(&mut self, raw: &str) -> Result<StatusFilter, TicketError> {
        let Ok(filter) = raw.parse::<StatusFilter>() else {
            warn!(value = raw, current = %self.filter, "rejected invalid filter");
            return Err(TicketError::InvalidFilter(raw.to_string()));
        };
        self.set_filter(filter);
        Ok(filter)
    }

    #[must_use]
    pub fn get(&self, id: TicketId) -> Option<&Ticket> {
        self.tickets.iter().find(|ticket| ticket.id == id)
    }

    /// Remove the ticket with `id`, returning it. Absent ids are a no-op.
    pub fn delete_ticket(&mut self, id: TicketId) -> Option<Ticket> {
        let Some(index) = self.position(id) else {
            debug!(%id, "delete of absent ticket ignored");
            return None;
        };
        let removed = self.tickets.remove(index);
        self.bump();
        info!(%id, "ticket deleted");
        Some(removed)
    }

    /// Overwrite the ticket sharing `ticket.id`, keeping its position.
    pub fn save_ticket(&mut self, ticket: Ticket) -> SaveOutcome {
        let id = ticket.id;
        let Some(index) = self.position(id) else {
            warn!(%id, "save of unknown ticket ignored");
            return SaveOutcome::Ignored;
        };
        self.tickets[index] = ticket;
        self.bump();
        info!(%id, "ticket updated");
        SaveOutcome::Replaced
    }

    /// Append a new ticket. Its id must not already be in use.
    pub fn insert_ticket(&mut self, ticket: Ticket) -> Result<(), TicketError> {
        if self.position(ticket.id).is_some() {
            warn!(id = %ticket.id, "insert with duplicate id rejected");
            return Err(TicketError::DuplicateId(ticket.id));
        }
        info!(id = %ticket.id, title = %ticket.title, "ticket created");
        self.tickets.push(ticket);
        self.bump();
        Ok(())
    }

    /// One past the highest id in use, or 1 for an empty store.
    pub fn next_id(&self) -> Result<TicketId, TicketError> {
        match self.tickets.iter().map(|ticket| ticket.id).max() {
            None => TicketId::new(1).ok_or(TicketError::IdsExhausted),
            Some(max) => max.next().ok_or(TicketError::IdsExhausted),
        }
    }

    /// Total and per-status counts over the full collection.
    #[must_use]
    pub fn summary(&self) -> StatusSummary {
        self.tickets
            .iter()
            .fold(StatusSummary::default(), |mut summary, ticket| {
                summary.total += 1;
                match ticket.status {
                    Status::Open => summary.open += 1,
                    Status::InProgress => summary.in_progress += 1,
                    Status::Closed => summary.closed += 1,
                }
                summary
            })
    }

    /// Mutation counter. Changes whenever the collection changes, never on
    /// filter changes or reads.
    #[must_use]
    pub const fn version(&self) -> u64 {
        self.version
    }

    fn position(&self, id: TicketId) -> Option<usize> {
        self.tickets.iter().position(|ticket| ticket.id == id)
    }

    const fn bump(&mut self) {
        self.version = self.version.wrapping_add(1);
    }
}
