use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::{fmt, num::NonZeroU32, str::FromStr};

/// Assignee label used when nobody owns a ticket.
pub const UNASSIGNED: &str = "Unassigned";

/// Positive ticket identifier. Zero is not representable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TicketId(NonZeroU32);

impl TicketId {
    /// Build an id from a raw integer, returning `None` for zero.
    #[must_use]
    pub const fn new(raw: u32) -> Option<Self> {
        match NonZeroU32::new(raw) {
            Some(value) => Some(Self(value)),
            None => None,
        }
    }

    #[must_use]
    pub const fn get(self) -> u32 {
        self.0.get()
    }

    /// The id immediately after this one, or `None` on overflow.
    #[must_use]
    pub fn next(self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }
}

/// Ticket lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    Open,
    #[serde(rename = "In Progress")]
    InProgress,
    Closed,
}

impl Status {
    /// Every status, in board order.
    pub const ALL: [Self; 3] = [Self::Open, Self::InProgress, Self::Closed];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "Open",
            Self::InProgress => "In Progress",
            Self::Closed => "Closed",
        }
    }
}

/// Ticket priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

/// The status filter applied to the ticket list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum StatusFilter {
    #[default]
    All,
    Only(Status),
}

impl StatusFilter {
    /// Returns true if a ticket with `status` is visible under this filter.
    #[must_use]
    pub fn matches(self, status: Status) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == status,
        }
    }
}

impl From<Status> for StatusFilter {
    fn from(status: Status) -> Self {
        Self::Only(status)
    }
}

/// A tracked unit of support work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    pub id: TicketId,
    pub title: String,
    pub description: String,
    pub status: Status,
    pub priority: Priority,
    pub assigned_to: String,
    pub date_created: NaiveDate,
}

impl Ticket {
    #[must_use]
    pub fn is_unassigned(&self) -> bool {
        self.assigned_to == UNASSIGNED
    }
}

/// Error returned when parsing an id or enum value from text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseEnumError {
    pub expected: &'static str,
    pub got: String,
}

impl fmt::Display for ParseEnumError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid {}: '{}'", self.expected, self.got)
    }
}

impl std::error::Error for ParseEnumError {}

impl fmt::Display for TicketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("All"),
            Self::Only(status) => f.write_str(status.as_str()),
        }
    }
}

/// Lowercase, trim, and fold `-`/`_` into spaces so "in-progress" parses.
fn normalize(input: &str) -> String {
    input
        .trim()
        .chars()
        .map(|c| match c {
            '-' | '_' => ' ',
            other => other.to_ascii_lowercase(),
        })
        .collect()
}

impl FromStr for TicketId {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);
        digits
            .parse::<u32>()
            .ok()
            .and_then(Self::new)
            .ok_or_else(|| ParseEnumError {
                expected: "ticket id",
                got: s.to_string(),
            })
    }
}

impl FromStr for Status {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = normalize(s);
        match normalized.as_str() {
            "open" => Ok(Self::Open),
            "in progress" | "inprogress" => Ok(Self::InProgress),
            "closed" => Ok(Self::Closed),
            _ => Err(ParseEnumError {
                expected: "status",
                got: s.to_string(),
            }),
        }
    }
}

impl FromStr for Priority {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = normalize(s);
        match normalized.as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(ParseEnumError {
                expected: "priority",
                got: s.to_string(),
            }),
        }
    }
}

impl FromStr for StatusFilter {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if normalize(s) == "all" {
            return Ok(Self::All);
        }
        Status::from_str(s).map(Self::Only).map_err(|_| ParseEnumError {
            expected: "filter",
            got: s.to_string(),
        })
    }
}

impl TryFrom<String> for StatusFilter {
    type Error = ParseEnumError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<StatusFilter> for String {
    fn from(filter: StatusFilter) -> Self {
        filter.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::{ParseEnumError, Priority, Status, StatusFilter, Ticket, TicketId, UNASSIGNED};
    use chrono::NaiveDate;
    use std::str::FromStr;

    fn id(raw: u32) -> TicketId {
        TicketId::new(raw).unwrap()
    }

    #[test]
    fn ticket_id_rejects_zero() {
        assert!(TicketId::new(0).is_none());
        assert_eq!(TicketId::new(7).map(TicketId::get), Some(7));
    }

    #[test]
    fn ticket_id_parses_plain_and_hash_prefixed() {
        assert_eq!(TicketId::from_str("13").unwrap(), id(13));
        assert_eq!(TicketId::from_str(" #4 ").unwrap(), id(4));
        assert!(TicketId::from_str("0").is_err());
        assert!(TicketId::from_str("-2").is_err());
        assert!(TicketId::from_str("abc").is_err());
    }

    #[test]
    fn ticket_id_next_stops_at_overflow() {
        assert_eq!(id(15).next(), Some(id(16)));
        assert_eq!(id(u32::MAX).next(), None);
    }

    #[test]
    fn enum_json_uses_display_labels() {
        assert_eq!(
            serde_json::to_string(&Status::InProgress).unwrap(),
            "\"In Progress\""
        );
        assert_eq!(serde_json::to_string(&Priority::High).unwrap(), "\"High\"");
        assert_eq!(
            serde_json::from_str::<Status>("\"Closed\"").unwrap(),
            Status::Closed
        );
        assert!(serde_json::from_str::<Status>("\"Pending\"").is_err());
    }

    #[test]
    fn display_parse_roundtrips() {
        for value in Status::ALL {
            assert_eq!(Status::from_str(&value.to_string()).unwrap(), value);
        }
        for value in [Priority::Low, Priority::Medium, Priority::High] {
            assert_eq!(Priority::from_str(&value.to_string()).unwrap(), value);
        }
    }

    #[test]
    fn status_parse_is_lenient_about_case_and_separators() {
        assert_eq!(Status::from_str("in-progress").unwrap(), Status::InProgress);
        assert_eq!(Status::from_str("IN_PROGRESS").unwrap(), Status::InProgress);
        assert_eq!(Status::from_str(" closed ").unwrap(), Status::Closed);
    }

    #[test]
    fn filter_parses_all_and_statuses() {
        assert_eq!(StatusFilter::from_str("All").unwrap(), StatusFilter::All);
        assert_eq!(StatusFilter::from_str("all").unwrap(), StatusFilter::All);
        assert_eq!(
            StatusFilter::from_str("Closed").unwrap(),
            StatusFilter::Only(Status::Closed)
        );
        assert_eq!(
            StatusFilter::from_str("Pending").unwrap_err(),
            ParseEnumError {
                expected: "filter",
                got: "Pending".to_string(),
            }
        );
    }

    #[test]
    fn filter_matches() {
        assert!(StatusFilter::All.matches(Status::Closed));
        assert!(StatusFilter::Only(Status::Open).matches(Status::Open));
        assert!(!StatusFilter::Only(Status::Open).matches(Status::Closed));
    }

    #[test]
    fn filter_serializes_as_label() {
        assert_eq!(
            serde_json::to_string(&StatusFilter::Only(Status::InProgress)).unwrap(),
            "\"In Progress\""
        );
        assert_eq!(
            serde_json::from_str::<StatusFilter>("\"All\"").unwrap(),
            StatusFilter::All
        );
        assert!(serde_json::from_str::<StatusFilter>("\"Someday\"").is_err());
    }

    #[test]
    fn ticket_json_uses_camel_case_keys() {
        let ticket = Ticket {
            id: id(3),
            title: "Typo on landing page header".to_string(),
            description: String::new(),
            status: Status::Open,
            priority: Priority::Low,
            assigned_to: UNASSIGNED.to_string(),
            date_created: NaiveDate::from_ymd_opt(2025, 1, 17).unwrap(),
        };
        let value = serde_json::to_value(&ticket).unwrap();
        assert_eq!(value["id"], 3);
        assert_eq!(value["assignedTo"], "Unassigned");
        assert_eq!(value["dateCreated"], "2025-01-17");
        assert!(ticket.is_unassigned());

        let back: Ticket = serde_json::from_value(value).unwrap();
        assert_eq!(back, ticket);
    }

    #[test]
    fn ticket_json_rejects_zero_id() {
        let raw = r#"{"id":0,"title":"t","description":"","status":"Open","priority":"Low","assignedTo":"Bob","dateCreated":"2025-01-01"}"#;
        assert!(serde_json::from_str::<Ticket>(raw).is_err());
    }
}
