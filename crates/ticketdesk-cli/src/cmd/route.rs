//! `td route`: show what the navigation guard decides for a path.

use crate::output::{CliError, OutputMode, render_error, render_item};
use crate::view::DecisionView;
use clap::Args;
use ticketdesk_core::route::{Route, guard};
use ticketdesk_core::AuthSession;

#[derive(Args, Debug)]
pub struct RouteArgs {
    /// Destination path, e.g. /tickets/3.
    pub path: String,

    /// Evaluate as a logged-in session.
    #[arg(long)]
    pub authenticated: bool,
}

pub fn run_route(args: &RouteArgs, output: OutputMode) -> anyhow::Result<()> {
    let destination = match Route::parse(&args.path) {
        Ok(route) => route,
        Err(err) => {
            render_error(output, &CliError::from(&err))?;
            anyhow::bail!(err);
        }
    };

    let mut auth = AuthSession::new();
    if args.authenticated {
        auth.login();
    }

    render_item(&DecisionView(&guard(destination, &auth)), output)?;
    Ok(())
}
