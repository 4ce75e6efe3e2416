//! `td session`: run a scripted session from a file or stdin.
//!
//! All lines share one ticket store and one login flag, so a script can log
//! in, filter, delete, and list in sequence. Nothing survives the process.

use crate::output::{CliError, OutputMode, render_error};
use crate::session::{Session, run_script};
use clap::Args;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use ticketdesk_core::config::EffectiveConfig;
use tracing::info;

#[derive(Args, Debug)]
pub struct SessionArgs {
    /// Read commands from this file instead of stdin.
    #[arg(long, value_name = "FILE")]
    pub script: Option<PathBuf>,
}

pub fn run_session(
    args: &SessionArgs,
    output: OutputMode,
    config: &EffectiveConfig,
) -> anyhow::Result<()> {
    let mut session = Session::new(super::open_store(config, output)?);
    let stdout = io::stdout();
    let stderr = io::stderr();
    let mut out = stdout.lock();
    let mut err = stderr.lock();

    let report = match &args.script {
        Some(path) => {
            let file = match File::open(path) {
                Ok(file) => file,
                Err(e) => {
                    let message = format!("cannot open script {}: {e}", path.display());
                    render_error(output, &CliError::new(&message))?;
                    anyhow::bail!(message);
                }
            };
            run_script(&mut session, BufReader::new(file), &mut out, &mut err, output)?
        }
        None => run_script(&mut session, io::stdin().lock(), &mut out, &mut err, output)?,
    };

    info!(
        executed = report.executed,
        failed = report.failed,
        location = %session.location().path(),
        version = session.store().version(),
        "session finished"
    );
    if report.failed > 0 {
        anyhow::bail!("{} session command(s) failed", report.failed);
    }
    Ok(())
}
