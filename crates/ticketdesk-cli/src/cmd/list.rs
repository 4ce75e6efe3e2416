//! `td list`: list tickets from a fresh session, optionally filtered.

use crate::output::{OutputMode, render_list};
use crate::view::TicketRow;
use clap::Args;
use ticketdesk_core::StatusFilter;
use ticketdesk_core::config::EffectiveConfig;

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Filter by status: All, Open, "In Progress", Closed.
    #[arg(short, long)]
    pub status: Option<StatusFilter>,
}

pub fn run_list(args: &ListArgs, output: OutputMode, config: &EffectiveConfig) -> anyhow::Result<()> {
    let mut store = super::open_store(config, output)?;
    if let Some(filter) = args.status {
        store.set_filter(filter);
    }

    let rows: Vec<TicketRow<'_>> = store.filtered_list().into_iter().map(TicketRow).collect();
    if rows.is_empty() && !output.is_json() {
        println!("No tickets match filter {}", store.current_filter());
        return Ok(());
    }
    render_list(&rows, output)?;
    Ok(())
}
