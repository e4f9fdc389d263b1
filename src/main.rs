//! shopscore - rank shopping search results by rating and review sentiment

use clap::Parser;
use tracing_subscriber::EnvFilter;

use shopscore::cli::{Cli, Commands};
use shopscore::error::Result;

mod commands;
mod utils;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        if let Some(hint) = e.hint() {
            eprintln!("\n{}", hint);
        }
        std::process::exit(1);
    }
}

/// Diagnostics go to stderr so `--json` output stays clean
fn init_tracing(verbose: bool) {
    let default_directive = if verbose { "shopscore=debug" } else { "shopscore=info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Search { query, min_price, max_price, json } => {
            commands::cmd_search(&query, min_price, max_price, json)
        }
        Commands::Score { url, fallback_rating, json } => {
            commands::cmd_score(&url, fallback_rating, json)
        }
        Commands::Config => commands::cmd_config(),
    }
}
