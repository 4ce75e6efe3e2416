#![forbid(unsafe_code)]

mod cmd;
mod output;
mod session;
mod view;

use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use output::{CliError, OutputMode, render_error};
use std::env;
use ticketdesk_core::ErrorCode;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "td: in-memory support ticket tracker",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format. Defaults to pretty on a terminal, text when piped.
    #[arg(long, global = true, value_enum)]
    format: Option<OutputMode>,

    /// Emit JSON output instead of human-readable text.
    #[arg(long, global = true, hide = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        next_help_heading = "Read",
        about = "List tickets",
        long_about = "List the seed tickets, optionally filtered by status.",
        after_help = "EXAMPLES:\n    # All tickets\n    td list\n\n    # Only closed tickets\n    td list --status Closed\n\n    # Emit machine-readable output\n    td list --format json"
    )]
    List(cmd::list::ListArgs),

    #[command(
        next_help_heading = "Read",
        about = "Show one ticket",
        long_about = "Show every field of a single ticket by id.",
        after_help = "EXAMPLES:\n    # Show ticket 7\n    td show 7"
    )]
    Show(cmd::show::ShowArgs),

    #[command(
        next_help_heading = "Read",
        about = "Dashboard counts",
        long_about = "Show the total number of tickets and the count per status."
    )]
    Summary,

    #[command(
        next_help_heading = "Navigation",
        about = "Check a route against the login guard",
        long_about = "Print whether navigating to a path is allowed or redirected to login.",
        after_help = "EXAMPLES:\n    # Logged-out visitor\n    td route /tickets\n\n    # Logged-in session\n    td route /tickets/3 --authenticated"
    )]
    Route(cmd::route::RouteArgs),

    #[command(
        next_help_heading = "Session",
        about = "Run a scripted session",
        long_about = "Run session commands line by line against one in-memory store and login flag.",
        after_help = "EXAMPLES:\n    # Pipe a script\n    printf 'login\\nfilter Closed\\ndelete 13\\nlist\\n' | td session\n\n    # Run a script file\n    td session --script demo.td"
    )]
    Session(cmd::session::SessionArgs),

    #[command(
        next_help_heading = "Shell",
        about = "Generate shell completion scripts",
        after_help = "EXAMPLES:\n    # Generate bash completions\n    td completions bash"
    )]
    Completions(CompletionsArgs),
}

#[derive(Args, Debug)]
struct CompletionsArgs {
    /// Target shell for completion script generation.
    #[arg(value_enum)]
    shell: Shell,
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("TICKETDESK_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if env::var("DEBUG").is_ok() {
            "ticketdesk=debug,info"
        } else if verbose {
            "ticketdesk=info,warn"
        } else {
            "ticketdesk=warn"
        })
    });

    let format = env::var("TICKETDESK_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Commands::Completions(args) = &cli.command {
        let mut command = Cli::command();
        clap_complete::generate(args.shell, &mut command, "td", &mut std::io::stdout());
        return Ok(());
    }

    let project_root = env::current_dir()?;
    let config = match ticketdesk_core::config::resolve_config(&project_root, cli.json) {
        Ok(config) => config,
        Err(err) => {
            // No resolved output mode yet; honour the explicit flags only.
            let output = cli.format.unwrap_or(if cli.json {
                OutputMode::Json
            } else {
                OutputMode::Text
            });
            render_error(
                output,
                &CliError::from_load_error(ErrorCode::ConfigParseError, &err),
            )?;
            return Err(err);
        }
    };
    let output = cli
        .format
        .unwrap_or_else(|| OutputMode::from_resolved(&config.resolved_output));
    info!(?output, root = %project_root.display(), "starting");

    match &cli.command {
        Commands::List(args) => cmd::list::run_list(args, output, &config),
        Commands::Show(args) => cmd::show::run_show(args, output, &config),
        Commands::Summary => cmd::summary::run_summary(output, &config),
        Commands::Route(args) => cmd::route::run_route(args, output),
        Commands::Session(args) => cmd::session::run_session(args, output, &config),
        Commands::Completions(_) => Ok(()),
    }
}
