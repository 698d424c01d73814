#![forbid(unsafe_code)]

mod cmd;
mod output;

use clap::{Parser, Subcommand};
use output::OutputMode;
use std::env;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "threadview: prepare chat post lists for display",
    long_about = None
)]
struct Cli {
    /// Enable debug logging (overrides THREADVIEW_LOG).
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON output instead of one token per line.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    const fn output_mode(&self) -> OutputMode {
        if self.json {
            OutputMode::Json
        } else {
            OutputMode::Text
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        about = "Prepare a post list from a JSON dump",
        long_about = "Read newest-first posts from a JSON array and print the display list: \
                      post ids interleaved with day, unread and deleted-root markers.",
        after_help = "EXAMPLES:\n    # Prepare a channel for alice\n    threadview prepare posts.json --user-id u1 --username alice\n\n    # Mark posts after a last-viewed time as new\n    threadview prepare posts.json --user-id u1 --username alice --last-viewed-at 1709251200000\n\n    # Read from stdin and emit JSON\n    cat posts.json | threadview prepare - --user-id u1 --username alice --json"
    )]
    Prepare(cmd::prepare::PrepareArgs),
}

const DEBUG_FILTER: &str = "threadview=debug,threadview_core=debug,info";

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new(DEBUG_FILTER)
    } else {
        EnvFilter::try_from_env("THREADVIEW_LOG").unwrap_or_else(|_| {
            EnvFilter::new(if env::var("DEBUG").is_ok() {
                DEBUG_FILTER
            } else {
                "threadview=info,warn"
            })
        })
    };

    let format = env::var("THREADVIEW_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    // Logs go to stderr; stdout carries the prepared list.
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
    if cli.verbose {
        info!("Verbose mode enabled");
    }

    let output = cli.output_mode();
    match cli.command {
        Commands::Prepare(ref args) => cmd::prepare::run_prepare(args, output),
    }
}
