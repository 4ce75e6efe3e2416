//! `td show`: show one ticket by id.

use crate::output::{CliError, OutputMode, render_error, render_item};
use crate::view::TicketCard;
use clap::Args;
use ticketdesk_core::config::EffectiveConfig;
use ticketdesk_core::{TicketError, TicketId};

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Ticket id, e.g. 7 or #7.
    pub id: TicketId,
}

pub fn run_show(args: &ShowArgs, output: OutputMode, config: &EffectiveConfig) -> anyhow::Result<()> {
    let store = super::open_store(config, output)?;
    let Some(ticket) = store.get(args.id) else {
        let err = TicketError::NotFound(args.id);
        render_error(output, &CliError::from(&err))?;
        anyhow::bail!(err);
    };
    render_item(&TicketCard(ticket), output)?;
    Ok(())
}
