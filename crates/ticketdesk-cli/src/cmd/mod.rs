pub mod list;
pub mod route;
pub mod session;
pub mod show;
pub mod summary;

use crate::output::{CliError, OutputMode, render_error};
use ticketdesk_core::config::EffectiveConfig;
use ticketdesk_core::{ErrorCode, TicketStore};

/// Open a fresh store, rendering seed failures with their error code.
pub fn open_store(config: &EffectiveConfig, output: OutputMode) -> anyhow::Result<TicketStore> {
    match config.open_store() {
        Ok(store) => Ok(store),
        Err(err) => {
            render_error(
                output,
                &CliError::from_load_error(ErrorCode::SeedLoadFailed, &err),
            )?;
            Err(err)
        }
    }
}
