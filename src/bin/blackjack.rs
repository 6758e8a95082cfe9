//! Blackjack estimation CLI
//!
//! Unified driver for:
//! - Training the Monte Carlo, TD(0), and Q-learning estimators
//! - Evaluating learned play over autoplayed rounds
//! - Exporting snapshots as JSON for further analysis

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "blackjack")]
#[command(version, about = "Tabular RL value estimation for Blackjack", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run Monte Carlo, TD(0), or Q-learning episodes
    Train(blackjack_rl::cli::commands::train::TrainArgs),

    /// Autoplay rounds with a trained snapshot and report win/loss stats
    Evaluate(blackjack_rl::cli::commands::evaluate::EvaluateArgs),

    /// Convert a snapshot into JSON records
    Export(blackjack_rl::cli::commands::export::ExportArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Train(args) => blackjack_rl::cli::commands::train::execute(args),
        Commands::Evaluate(args) => blackjack_rl::cli::commands::evaluate::execute(args),
        Commands::Export(args) => blackjack_rl::cli::commands::export::execute(args),
    }
}
