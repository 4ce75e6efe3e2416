//! `td summary`: dashboard counts for a fresh session.

use crate::output::{OutputMode, render_item};
use crate::view::SummaryView;
use ticketdesk_core::config::EffectiveConfig;

pub fn run_summary(output: OutputMode, config: &EffectiveConfig) -> anyhow::Result<()> {
    let store = super::open_store(config, output)?;
    render_item(&SummaryView(&store.summary()), output)?;
    Ok(())
}
