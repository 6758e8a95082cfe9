//! Evaluate command - autoplay rounds with a trained snapshot

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use crate::{cli::output, learning::Agent};

#[derive(Debug, Parser)]
pub struct EvaluateArgs {
    /// Snapshot holding the learned Q-values
    #[arg(long)]
    pub snapshot: PathBuf,

    /// Number of rounds to autoplay
    #[arg(long, default_value_t = 10_000)]
    pub rounds: usize,

    /// Seed for the simulator's random source; omit for entropy
    #[arg(long)]
    pub seed: Option<u64>,

    /// Print the summary as JSON instead of plain text
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct EvaluateSummary {
    snapshot: String,
    rounds: usize,
    wins: u64,
    losses: u64,
    win_rate: f64,
}

pub fn execute(args: EvaluateArgs) -> Result<()> {
    let mut agent = match args.seed {
        Some(seed) => Agent::from_seed(seed),
        None => Agent::new(),
    };
    agent
        .load(&args.snapshot)
        .with_context(|| format!("Failed to load snapshot {}", args.snapshot.display()))?;

    let pb = output::create_episode_progress(args.rounds as u64);
    pb.set_message("autoplay");
    for _ in 0..args.rounds {
        agent.autoplay_round()?;
        pb.inc(1);
    }
    pb.finish_and_clear();

    let game = agent.simulator();
    let summary = EvaluateSummary {
        snapshot: args.snapshot.display().to_string(),
        rounds: args.rounds,
        wins: game.wins(),
        losses: game.losses(),
        win_rate: if args.rounds > 0 {
            game.wins() as f64 / args.rounds as f64
        } else {
            0.0
        },
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        output::print_section("Evaluation complete");
        output::print_kv("Snapshot", &summary.snapshot);
        output::print_kv("Rounds", &output::format_number(summary.rounds));
        output::print_kv("Wins", &output::format_number(summary.wins as usize));
        output::print_kv("Losses", &output::format_number(summary.losses as usize));
        output::print_kv("Win rate", &format!("{:.4}", summary.win_rate));
    }

    Ok(())
}
