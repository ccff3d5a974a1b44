//! `sentra` command-line entry point

use clap::Parser;
use sentra_cli::commands::{self, Commands};
use sentra_cli::CliResult;

/// Multilingual sentiment and per-page sentiment trend analysis
#[derive(Debug, Parser)]
#[command(name = "sentra", author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() -> CliResult<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze(args) => args.execute(),
        Commands::Trend(args) => args.execute(),
        Commands::List { subcommand } => commands::list(subcommand),
        Commands::Validate(args) => args.execute(),
    }
}
