//! Ticket data model.

pub mod ticket;

pub use ticket::{ParseEnumError, Priority, Status, StatusFilter, Ticket, TicketId, UNASSIGNED};
