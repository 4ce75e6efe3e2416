//! Renderable wrappers for core types.

use crate::output::{Renderable, pretty_kv, pretty_section, write_json};
use std::io::{self, Write};
use ticketdesk_core::{NavigationDecision, StatusSummary, Ticket};

/// One ticket as a list row.
pub struct TicketRow<'a>(pub &'a Ticket);

impl Renderable for TicketRow<'_> {
    fn render_human(&self, w: &mut dyn Write) -> io::Result<()> {
        let t = self.0;
        writeln!(
            w,
            "#{:<4} {:<12} {:<7} {}  ({}, {})",
            t.id.to_string(),
            format!("[{}]", t.status),
            t.priority,
            t.title,
            t.assigned_to,
            t.date_created
        )
    }

    fn render_json(&self, w: &mut dyn Write) -> io::Result<()> {
        write_json(w, self.0)
    }

    fn render_table(&self, w: &mut dyn Write) -> io::Result<()> {
        let t = self.0;
        writeln!(
            w,
            "{}\t{}\t{}\t{}\t{}\t{}",
            t.id, t.status, t.priority, t.assigned_to, t.date_created, t.title
        )
    }

    fn table_headers() -> &'static [&'static str] {
        &["ID", "STATUS", "PRIORITY", "ASSIGNEE", "CREATED", "TITLE"]
    }
}

/// One ticket with every field, for the detail view.
pub struct TicketCard<'a>(pub &'a Ticket);

impl Renderable for TicketCard<'_> {
    fn render_human(&self, w: &mut dyn Write) -> io::Result<()> {
        let t = self.0;
        pretty_section(w, &format!("#{} {}", t.id, t.title))?;
        pretty_kv(w, "Status", t.status.as_str())?;
        pretty_kv(w, "Priority", t.priority.as_str())?;
        pretty_kv(w, "Assignee", &t.assigned_to)?;
        pretty_kv(w, "Created", t.date_created.to_string())?;
        if !t.description.is_empty() {
            writeln!(w)?;
            writeln!(w, "{}", t.description)?;
        }
        Ok(())
    }

    fn render_json(&self, w: &mut dyn Write) -> io::Result<()> {
        write_json(w, self.0)
    }

    fn render_table(&self, w: &mut dyn Write) -> io::Result<()> {
        TicketRow(self.0).render_table(w)
    }
}

pub struct SummaryView<'a>(pub &'a StatusSummary);

impl Renderable for SummaryView<'_> {
    fn render_human(&self, w: &mut dyn Write) -> io::Result<()> {
        let s = self.0;
        pretty_section(w, "Dashboard")?;
        pretty_kv(w, "Total", s.total.to_string())?;
        pretty_kv(w, "Open", s.open.to_string())?;
        pretty_kv(w, "In Progress", s.in_progress.to_string())?;
        pretty_kv(w, "Closed", s.closed.to_string())
    }

    fn render_json(&self, w: &mut dyn Write) -> io::Result<()> {
        write_json(w, self.0)
    }

    fn render_table(&self, w: &mut dyn Write) -> io::Result<()> {
        let s = self.0;
        writeln!(
            w,
            "total={}\topen={}\tin_progress={}\tclosed={}",
            s.total, s.open, s.in_progress, s.closed
        )
    }
}

pub struct DecisionView<'a>(pub &'a NavigationDecision);

impl Renderable for DecisionView<'_> {
    fn render_human(&self, w: &mut dyn Write) -> io::Result<()> {
        match self.0 {
            NavigationDecision::Allowed { to } => writeln!(w, "✓ navigated to {to}"),
            NavigationDecision::Redirected { from, to } => {
                writeln!(w, "✗ {from} requires login; redirected to {to}")
            }
        }
    }

    fn render_json(&self, w: &mut dyn Write) -> io::Result<()> {
        write_json(w, self.0)
    }

    fn render_table(&self, w: &mut dyn Write) -> io::Result<()> {
        match self.0 {
            NavigationDecision::Allowed { to } => writeln!(w, "allowed\t{to}"),
            NavigationDecision::Redirected { from, to } => {
                writeln!(w, "redirected\t{from}\t{to}")
            }
        }
    }
}
