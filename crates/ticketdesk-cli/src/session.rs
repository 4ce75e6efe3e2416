//! Scripted sessions: one ticket store, one auth flag, one current location.
//!
//! Each input line is split into words (single/double quotes and backslash
//! escapes are honoured), parsed as a [`SessionCommand`], and executed
//! against the [`Session`]. Ticket commands first navigate to the view they
//! belong to; the guard is consulted on every attempt, and a redirect stops
//! the command before it touches the store.

use crate::output::{CliError, OutputMode, Renderable, pretty_kv, write_error, write_item, write_json};
use crate::view::{DecisionView, SummaryView, TicketCard, TicketRow};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::io::{self, BufRead, Write};
use ticketdesk_core::error::ErrorCode;
use ticketdesk_core::model::UNASSIGNED;
use ticketdesk_core::route::{self, NavigationDecision, Route};
use ticketdesk_core::{
    AuthSession, Priority, SaveOutcome, Status, StatusFilter, StatusSummary, Ticket, TicketError,
    TicketId, TicketStore,
};
use tracing::debug;

#[derive(Parser, Debug)]
#[command(
    no_binary_name = true,
    disable_version_flag = true,
    about = "Session commands"
)]
pub struct SessionLine {
    #[command(subcommand)]
    pub command: SessionCommand,
}

#[derive(Subcommand, Debug)]
pub enum SessionCommand {
    /// Show tickets under the current filter.
    List,
    /// Set the status filter: All, Open, In Progress, Closed.
    Filter {
        #[arg(num_args = 1.., required = true)]
        value: Vec<String>,
    },
    /// Show one ticket.
    Show { id: TicketId },
    /// Delete a ticket. Deleting a missing id does nothing.
    Delete { id: TicketId },
    /// Overwrite an existing ticket; unknown ids are ignored.
    Save(SaveArgs),
    /// Create a ticket with the next free id.
    Create(CreateArgs),
    /// Dashboard counts.
    Summary,
    /// Log in (mock, no credentials).
    Login,
    /// Log out.
    Logout,
    /// Navigate to a path such as /tickets/3.
    Nav { path: String },
    /// Current location and login state.
    Whoami,
    /// End the session.
    #[command(alias = "exit")]
    Quit,
}

#[derive(Args, Debug)]
pub struct SaveArgs {
    pub id: TicketId,
    #[arg(long, value_parser = non_empty_title)]
    pub title: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub status: Option<Status>,
    #[arg(long)]
    pub priority: Option<Priority>,
    #[arg(long)]
    pub assignee: Option<String>,
}

#[derive(Args, Debug)]
pub struct CreateArgs {
    #[arg(long, value_parser = non_empty_title)]
    pub title: String,
    #[arg(long, default_value = "")]
    pub description: String,
    #[arg(long, default_value = "Open")]
    pub status: Status,
    #[arg(long, default_value = "Medium")]
    pub priority: Priority,
    #[arg(long, default_value = UNASSIGNED)]
    pub assignee: String,
}

/// Tickets always carry a title; blank ones are refused at parse time.
fn non_empty_title(raw: &str) -> Result<String, String> {
    if raw.trim().is_empty() {
        Err("title must not be empty".to_string())
    } else {
        Ok(raw.to_string())
    }
}

/// What a session command produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SessionEvent {
    Tickets {
        filter: StatusFilter,
        tickets: Vec<Ticket>,
    },
    Ticket {
        ticket: Ticket,
    },
    Filter {
        filter: StatusFilter,
    },
    Deleted {
        id: TicketId,
        removed: bool,
    },
    Saved {
        id: TicketId,
        outcome: SaveOutcome,
    },
    Created {
        ticket: Ticket,
    },
    Summary {
        summary: StatusSummary,
    },
    Auth {
        authenticated: bool,
    },
    Navigation {
        #[serde(flatten)]
        decision: NavigationDecision,
    },
    Location {
        location: Route,
        authenticated: bool,
    },
}

/// Per-session state handed to every command.
#[derive(Debug, Clone)]
pub struct Session {
    store: TicketStore,
    auth: AuthSession,
    location: Route,
    today: NaiveDate,
}

impl Session {
    pub fn new(store: TicketStore) -> Self {
        Self::with_today(store, chrono::Local::now().date_naive())
    }

    /// A session whose creation date is fixed, for reproducible output.
    pub const fn with_today(store: TicketStore, today: NaiveDate) -> Self {
        Self {
            store,
            auth: AuthSession::new(),
            location: Route::Landing,
            today,
        }
    }

    pub const fn store(&self) -> &TicketStore {
        &self.store
    }

    pub const fn location(&self) -> Route {
        self.location
    }

    /// Attempt to move to `route`; the location follows any redirect.
    pub fn navigate(&mut self, route: Route) -> NavigationDecision {
        let decision = route::guard(route, &self.auth);
        self.location = decision.destination();
        decision
    }

    pub fn execute(&mut self, command: SessionCommand) -> Result<SessionEvent, TicketError> {
        if let Some(view) = view_for(&command) {
            let decision = self.navigate(view);
            if !decision.is_allowed() {
                debug!(?command, "command blocked by guard");
                return Ok(SessionEvent::Navigation { decision });
            }
        }

        match command {
            SessionCommand::List => Ok(self.tickets_event()),
            SessionCommand::Filter { value } => {
                let filter = self.store.set_filter_str(&value.join(" "))?;
                Ok(SessionEvent::Filter { filter })
            }
            SessionCommand::Show { id } => {
                let ticket = self.store.get(id).ok_or(TicketError::NotFound(id))?;
                Ok(SessionEvent::Ticket {
                    ticket: ticket.clone(),
                })
            }
            SessionCommand::Delete { id } => {
                let removed = self.store.delete_ticket(id).is_some();
                Ok(SessionEvent::Deleted { id, removed })
            }
            SessionCommand::Save(args) => {
                let id = args.id;
                let ticket = self.build_replacement(args);
                let outcome = self.store.save_ticket(ticket);
                Ok(SessionEvent::Saved { id, outcome })
            }
            SessionCommand::Create(args) => {
                let ticket = Ticket {
                    id: self.store.next_id()?,
                    title: args.title,
                    description: args.description,
                    status: args.status,
                    priority: args.priority,
                    assigned_to: args.assignee,
                    date_created: self.today,
                };
                self.store.insert_ticket(ticket.clone())?;
                Ok(SessionEvent::Created { ticket })
            }
            SessionCommand::Summary => Ok(SessionEvent::Summary {
                summary: self.store.summary(),
            }),
            SessionCommand::Login => {
                self.auth.login();
                Ok(self.auth_event())
            }
            SessionCommand::Logout => {
                self.auth.logout();
                Ok(self.auth_event())
            }
            SessionCommand::Nav { path } => {
                let decision = self.navigate(Route::parse(&path)?);
                Ok(SessionEvent::Navigation { decision })
            }
            SessionCommand::Whoami | SessionCommand::Quit => Ok(SessionEvent::Location {
                location: self.location,
                authenticated: self.auth.is_authenticated(),
            }),
        }
    }

    fn tickets_event(&self) -> SessionEvent {
        SessionEvent::Tickets {
            filter: self.store.current_filter(),
            tickets: self.store.filtered_list().into_iter().cloned().collect(),
        }
    }

    const fn auth_event(&self) -> SessionEvent {
        SessionEvent::Auth {
            authenticated: self.auth.is_authenticated(),
        }
    }

    /// Whole-ticket replacement: the stored ticket with overrides applied, or
    /// a ticket built from the overrides alone when the id is unknown.
    fn build_replacement(&self, args: SaveArgs) -> Ticket {
        let base = self.store.get(args.id).cloned().unwrap_or_else(|| Ticket {
            id: args.id,
            title: String::new(),
            description: String::new(),
            status: Status::Open,
            priority: Priority::Medium,
            assigned_to: UNASSIGNED.to_string(),
            date_created: self.today,
        });
        Ticket {
            id: base.id,
            title: args.title.unwrap_or(base.title),
            description: args.description.unwrap_or(base.description),
            status: args.status.unwrap_or(base.status),
            priority: args.priority.unwrap_or(base.priority),
            assigned_to: args.assignee.unwrap_or(base.assigned_to),
            date_created: base.date_created,
        }
    }
}

/// The protected view a command runs in, if any.
const fn view_for(command: &SessionCommand) -> Option<Route> {
    match command {
        SessionCommand::List
        | SessionCommand::Filter { .. }
        | SessionCommand::Delete { .. }
        | SessionCommand::Create(_) => Some(Route::Tickets),
        SessionCommand::Show { id } => Some(Route::TicketDetail(*id)),
        SessionCommand::Save(args) => Some(Route::TicketDetail(args.id)),
        SessionCommand::Summary => Some(Route::Dashboard),
        SessionCommand::Login
        | SessionCommand::Logout
        | SessionCommand::Nav { .. }
        | SessionCommand::Whoami
        | SessionCommand::Quit => None,
    }
}

impl Renderable for SessionEvent {
    fn render_human(&self, w: &mut dyn Write) -> io::Result<()> {
        match self {
            Self::Tickets { filter, tickets } => {
                writeln!(w, "Filter: {filter} ({} tickets)", tickets.len())?;
                for ticket in tickets {
                    TicketRow(ticket).render_human(w)?;
                }
                Ok(())
            }
            Self::Ticket { ticket } => TicketCard(ticket).render_human(w),
            Self::Filter { filter } => writeln!(w, "✓ filter set to {filter}"),
            Self::Deleted { id, removed: true } => writeln!(w, "✓ deleted #{id}"),
            Self::Deleted { id, removed: false } => writeln!(w, "· #{id} not present, nothing deleted"),
            Self::Saved {
                id,
                outcome: SaveOutcome::Replaced,
            } => writeln!(w, "✓ saved #{id}"),
            Self::Saved {
                id,
                outcome: SaveOutcome::Ignored,
            } => writeln!(w, "· #{id} does not exist, save ignored (use `create`)"),
            Self::Created { ticket } => writeln!(w, "✓ created #{} {}", ticket.id, ticket.title),
            Self::Summary { summary } => SummaryView(summary).render_human(w),
            Self::Auth { authenticated: true } => writeln!(w, "✓ logged in"),
            Self::Auth {
                authenticated: false,
            } => writeln!(w, "✓ logged out"),
            Self::Navigation { decision } => DecisionView(decision).render_human(w),
            Self::Location {
                location,
                authenticated,
            } => {
                pretty_kv(w, "Location", location.path())?;
                pretty_kv(w, "Logged in", if *authenticated { "yes" } else { "no" })
            }
        }
    }

    fn render_json(&self, w: &mut dyn Write) -> io::Result<()> {
        write_json(w, self)
    }

    fn render_table(&self, w: &mut dyn Write) -> io::Result<()> {
        match self {
            Self::Tickets { filter, tickets } => {
                writeln!(w, "# filter={filter} count={}", tickets.len())?;
                for ticket in tickets {
                    TicketRow(ticket).render_table(w)?;
                }
                Ok(())
            }
            Self::Ticket { ticket } => TicketCard(ticket).render_table(w),
            Self::Filter { filter } => writeln!(w, "filter\t{filter}"),
            Self::Deleted { id, removed } => {
                writeln!(w, "deleted\t{id}\t{}", if *removed { "removed" } else { "absent" })
            }
            Self::Saved { id, outcome } => {
                let outcome = match outcome {
                    SaveOutcome::Replaced => "replaced",
                    SaveOutcome::Ignored => "ignored",
                };
                writeln!(w, "saved\t{id}\t{outcome}")
            }
            Self::Created { ticket } => writeln!(w, "created\t{}", ticket.id),
            Self::Summary { summary } => SummaryView(summary).render_table(w),
            Self::Auth { authenticated } => writeln!(w, "authenticated\t{authenticated}"),
            Self::Navigation { decision } => DecisionView(decision).render_table(w),
            Self::Location {
                location,
                authenticated,
            } => writeln!(w, "location\t{location}\tauthenticated={authenticated}"),
        }
    }
}

/// Split a command line into words.
///
/// Whitespace separates words; `'...'` is literal, `"..."` allows `\"` and
/// `\\`, and a bare backslash escapes the next character.
pub fn split_words(line: &str) -> Result<Vec<String>, String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match c {
            '\'' => {
                in_word = true;
                loop {
                    match chars.next() {
                        Some('\'') => break,
                        Some(inner) => current.push(inner),
                        None => return Err("unterminated single quote".to_string()),
                    }
                }
            }
            '"' => {
                in_word = true;
                loop {
                    match chars.next() {
                        Some('"') => break,
                        Some('\\') => match chars.next() {
                            Some(escaped @ ('"' | '\\')) => current.push(escaped),
                            Some(other) => {
                                current.push('\\');
                                current.push(other);
                            }
                            None => return Err("unterminated double quote".to_string()),
                        },
                        Some(inner) => current.push(inner),
                        None => return Err("unterminated double quote".to_string()),
                    }
                }
            }
            '\\' => {
                in_word = true;
                match chars.next() {
                    Some(escaped) => current.push(escaped),
                    None => return Err("trailing backslash".to_string()),
                }
            }
            c if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            other => {
                in_word = true;
                current.push(other);
            }
        }
    }

    if in_word {
        words.push(current);
    }
    Ok(words)
}

/// Totals for a finished script.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScriptReport {
    pub executed: usize,
    pub failed: usize,
}

/// Run every line of `input` against `session`.
///
/// Results go to `out` and per-line errors to `err`; a failing line does not
/// stop the script.
pub fn run_script(
    session: &mut Session,
    input: impl BufRead,
    out: &mut dyn Write,
    err: &mut dyn Write,
    mode: OutputMode,
) -> io::Result<ScriptReport> {
    let mut report = ScriptReport::default();

    for (index, line) in input.lines().enumerate() {
        let line = line?;
        let line_no = index + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let words = match split_words(trimmed) {
            Ok(words) => words,
            Err(message) => {
                report.failed += 1;
                write_error(err, mode, &invalid_command(line_no, &message))?;
                continue;
            }
        };

        let parsed = match SessionLine::try_parse_from(&words) {
            Ok(parsed) => parsed,
            Err(e) if matches!(
                e.kind(),
                clap::error::ErrorKind::DisplayHelp
                    | clap::error::ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
            ) =>
            {
                write!(out, "{}", e.render())?;
                continue;
            }
            Err(e) => {
                report.failed += 1;
                let rendered = e.render().to_string();
                let message = rendered
                    .lines()
                    .next()
                    .unwrap_or_default()
                    .trim_start_matches("error: ")
                    .to_string();
                write_error(err, mode, &invalid_command(line_no, &message))?;
                continue;
            }
        };

        if matches!(parsed.command, SessionCommand::Quit) {
            debug!(line = line_no, "session ended by quit");
            break;
        }

        report.executed += 1;
        match session.execute(parsed.command) {
            Ok(event) => write_item(out, &event, mode)?,
            Err(e) => {
                report.failed += 1;
                let mut cli_error = CliError::from(&e);
                cli_error.message = format!("line {line_no}: {}", cli_error.message);
                write_error(err, mode, &cli_error)?;
            }
        }
    }

    Ok(report)
}

fn invalid_command(line_no: usize, message: &str) -> CliError {
    let code = ErrorCode::InvalidCommand;
    CliError::with_details(
        format!("line {line_no}: {message}"),
        code.hint().unwrap_or_else(|| code.message()),
        code.code(),
    )
}
