//! ticketdesk-core library.
//!
//! Three independent pieces of session state:
//!
//! - [`store::TicketStore`]: the ordered ticket collection and status filter.
//! - [`auth::AuthSession`]: the logged-in flag.
//! - [`route::guard`]: the navigation check that consults the auth flag.
//!
//! # Conventions
//!
//! - **Errors**: [`error::TicketError`] for store/route failures, `anyhow::Result`
//!   for config and file loading.
//! - **Logging**: `tracing` macros; the binary installs the subscriber.

pub mod auth;
pub mod config;
pub mod error;
pub mod model;
pub mod route;
pub mod seed;
pub mod store;

pub use auth::AuthSession;
pub use error::{ErrorCode, TicketError};
pub use model::{Priority, Status, StatusFilter, Ticket, TicketId};
pub use route::{GuardState, NavigationDecision, Route};
pub use store::{SaveOutcome, StatusSummary, TicketStore};
