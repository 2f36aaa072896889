//! vectarget CLI
//!
//! Validates capability configuration and replays recorded host events

use clap::{Parser, Subcommand};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "vectarget")]
#[command(about = "vectarget - two-point targeting for single-point hosts", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Load and validate a capability configuration file
    CheckConfig(commands::check::CheckConfigArgs),
    /// Replay a JSON array of host events through the coordinator
    Replay(commands::replay::ReplayArgs),
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::CheckConfig(args) => commands::check::execute(args),
        Commands::Replay(args) => commands::replay::execute(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
