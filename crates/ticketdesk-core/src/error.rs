use crate::model::{ParseEnumError, TicketId};
use std::fmt;

/// Machine-readable error codes for scripted callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    ConfigParseError,
    SeedLoadFailed,
    TicketNotFound,
    DuplicateTicketId,
    InvalidTicketId,
    InvalidFilter,
    InvalidEnumValue,
    UnknownRoute,
    InvalidCommand,
    InternalUnexpected,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::ConfigParseError => "E1001",
            Self::SeedLoadFailed => "E1002",
            Self::TicketNotFound => "E2001",
            Self::DuplicateTicketId => "E2002",
            Self::InvalidTicketId => "E2003",
            Self::InvalidFilter => "E2004",
            Self::InvalidEnumValue => "E2005",
            Self::UnknownRoute => "E3001",
            Self::InvalidCommand => "E4001",
            Self::InternalUnexpected => "E9001",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::ConfigParseError => "Config file parse error",
            Self::SeedLoadFailed => "Seed file could not be loaded",
            Self::TicketNotFound => "Ticket not found",
            Self::DuplicateTicketId => "Ticket id already in use",
            Self::InvalidTicketId => "Invalid ticket id",
            Self::InvalidFilter => "Invalid status filter",
            Self::InvalidEnumValue => "Invalid status/priority value",
            Self::UnknownRoute => "Unknown route",
            Self::InvalidCommand => "Invalid session command",
            Self::InternalUnexpected => "Internal unexpected error",
        }
    }

    /// Optional remediation hint that can be surfaced to operators.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::ConfigParseError => Some("Fix syntax in .ticketdesk/config.toml and retry."),
            Self::SeedLoadFailed => {
                Some("Check that the configured seed file is a JSON array of tickets.")
            }
            Self::TicketNotFound => Some("Run `td list` to see the available ticket ids."),
            Self::DuplicateTicketId => Some("Pick an unused id, e.g. the store's next id."),
            Self::InvalidTicketId => Some("Ticket ids are positive integers, e.g. 7 or #7."),
            Self::InvalidFilter => Some("Use one of: All, Open, In Progress, Closed."),
            Self::InvalidEnumValue => {
                Some("Status is Open/In Progress/Closed; priority is Low/Medium/High.")
            }
            Self::UnknownRoute => Some(
                "Known routes: /, /auth/login, /auth/signup, /dashboard, /tickets, /tickets/<id>.",
            ),
            Self::InvalidCommand => Some("Type `help` inside a session for the command list."),
            Self::InternalUnexpected => Some("Retry once. If persistent, report a bug with logs."),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Errors raised by the ticket store and route table.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TicketError {
    #[error("ticket #{0} not found")]
    NotFound(TicketId),

    #[error("ticket #{0} already exists")]
    DuplicateId(TicketId),

    #[error("ticket id space exhausted")]
    IdsExhausted,

    #[error("invalid filter '{0}'")]
    InvalidFilter(String),

    #[error(transparent)]
    Parse(#[from] ParseEnumError),

    #[error("unknown route '{0}'")]
    UnknownRoute(String),
}

impl TicketError {
    /// The stable code for this error.
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::NotFound(_) => ErrorCode::TicketNotFound,
            Self::DuplicateId(_) => ErrorCode::DuplicateTicketId,
            Self::IdsExhausted => ErrorCode::InternalUnexpected,
            Self::InvalidFilter(_) => ErrorCode::InvalidFilter,
            Self::Parse(err) => match err.expected {
                "ticket id" => ErrorCode::InvalidTicketId,
                "filter" => ErrorCode::InvalidFilter,
                _ => ErrorCode::InvalidEnumValue,
            },
            Self::UnknownRoute(_) => ErrorCode::UnknownRoute,
        }
    }

    /// Machine-readable code string, e.g. `E2001`.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        self.code().code()
    }

    /// Remediation hint, falling back to the code's summary.
    #[must_use]
    pub fn suggestion(&self) -> String {
        let code = self.code();
        code.hint().unwrap_or_else(|| code.message()).to_string()
    }
}
