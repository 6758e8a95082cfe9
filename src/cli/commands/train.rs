//! Train command - run Monte Carlo, TD(0), or Q-learning episodes

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use serde::Serialize;

use crate::{
    blackjack::State,
    cli::output,
    learning::Agent,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Algorithm {
    /// Monte Carlo first-return averaging under the default policy
    Mc,
    /// TD(0) bootstrapping under the default policy
    Td,
    /// Q-learning with ε-greedy exploration
    Q,
}

impl Algorithm {
    fn name(self) -> &'static str {
        match self {
            Algorithm::Mc => "MC",
            Algorithm::Td => "TD",
            Algorithm::Q => "Q-learning",
        }
    }
}

#[derive(Debug, Parser)]
pub struct TrainArgs {
    /// Which estimator to run
    #[arg(long, value_enum)]
    pub algorithm: Algorithm,

    /// Total number of episodes
    #[arg(long, default_value_t = 100_000)]
    pub episodes: usize,

    /// Episodes per driver batch (the run is split into repeated calls so a
    /// driver can interleave other work)
    #[arg(long, default_value_t = 1_000)]
    pub batch_size: usize,

    /// Seed for the simulator's random source; omit for entropy
    #[arg(long)]
    pub seed: Option<u64>,

    /// Snapshot to start from
    #[arg(long)]
    pub load: Option<PathBuf>,

    /// Where to write the trained snapshot
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Print the summary as JSON instead of plain text
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct TrainSummary {
    algorithm: String,
    episodes: usize,
    seed: Option<u64>,
    mean_value: f64,
    visited_states: usize,
    snapshot: Option<String>,
}

pub fn execute(args: TrainArgs) -> Result<()> {
    let mut agent = match args.seed {
        Some(seed) => Agent::from_seed(seed),
        None => Agent::new(),
    };

    if let Some(path) = &args.load {
        agent
            .load(path)
            .with_context(|| format!("Failed to load snapshot {}", path.display()))?;
    }

    let pb = output::create_episode_progress(args.episodes as u64);
    pb.set_message(args.algorithm.name().to_string());

    let batch_size = args.batch_size.max(1);
    let mut remaining = args.episodes;
    while remaining > 0 {
        let batch = remaining.min(batch_size);
        match args.algorithm {
            Algorithm::Mc => agent.mc_run(batch)?,
            Algorithm::Td => agent.td_run(batch)?,
            Algorithm::Q => agent.q_run(batch)?,
        }
        remaining -= batch;
        pb.inc(batch as u64);
    }
    pb.finish_and_clear();

    if let Some(path) = &args.output {
        agent
            .save(path)
            .with_context(|| format!("Failed to save snapshot {}", path.display()))?;
    }

    let (mean_value, visited_states) = table_summary(&agent, args.algorithm)?;
    let summary = TrainSummary {
        algorithm: args.algorithm.name().to_string(),
        episodes: args.episodes,
        seed: args.seed,
        mean_value,
        visited_states,
        snapshot: args.output.as_ref().map(|p| p.display().to_string()),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        output::print_section("Training complete");
        output::print_kv("Algorithm", summary.algorithm.as_str());
        output::print_kv("Episodes", &output::format_number(summary.episodes));
        output::print_kv("Visited states", &output::format_number(summary.visited_states));
        output::print_kv("Mean value", &format!("{:.4}", summary.mean_value));
        if let Some(snapshot) = &summary.snapshot {
            output::print_kv("Snapshot", snapshot);
        }
    }

    Ok(())
}

/// Mean estimate and visited-state count for the trained table
fn table_summary(agent: &Agent, algorithm: Algorithm) -> Result<(f64, usize)> {
    let tables = agent.tables();
    let mut sum = 0.0;
    let mut visited = 0usize;
    for state in State::all() {
        let (value, count) = match algorithm {
            Algorithm::Mc => (tables.mc_value(&state)?, tables.mc_count(&state)?),
            Algorithm::Td => (tables.td_value(&state)?, tables.td_count(&state)?),
            Algorithm::Q => (tables.max_q(&state)?, tables.q_count(&state)?),
        };
        sum += value;
        if count > 0 {
            visited += 1;
        }
    }
    Ok((sum / State::all().count() as f64, visited))
}
