//! Export command - convert a snapshot into JSON records

use std::{fs::File, io::BufWriter, path::PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use serde_json::to_writer_pretty;

use crate::{blackjack::State, learning::snapshot};

#[derive(Debug, Parser)]
pub struct ExportArgs {
    /// Snapshot to export
    #[arg(long)]
    pub snapshot: PathBuf,

    /// Output file; stdout when omitted
    #[arg(long)]
    pub output: Option<PathBuf>,
}

/// One state's worth of estimates, flattened for external analysis
#[derive(Debug, Serialize)]
struct StateRecord {
    state: String,
    mc_value: f64,
    mc_return_sum: f64,
    mc_count: u64,
    td_value: f64,
    td_count: u64,
    q_hit: f64,
    q_stand: f64,
    q_count: u64,
}

pub fn execute(args: ExportArgs) -> Result<()> {
    let tables = snapshot::load(&args.snapshot)
        .with_context(|| format!("Failed to load snapshot {}", args.snapshot.display()))?;

    let mut records = Vec::with_capacity(State::all().count());
    for state in State::all() {
        let q = tables.q_pair(&state)?;
        records.push(StateRecord {
            state: state.key(),
            mc_value: tables.mc_value(&state)?,
            mc_return_sum: tables.mc_return_sum(&state)?,
            mc_count: tables.mc_count(&state)?,
            td_value: tables.td_value(&state)?,
            td_count: tables.td_count(&state)?,
            q_hit: q[0],
            q_stand: q[1],
            q_count: tables.q_count(&state)?,
        });
    }

    match &args.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create file {}", path.display()))?;
            to_writer_pretty(BufWriter::new(file), &records)
                .context("Failed to serialize records")?;
        }
        None => {
            println!("{}", serde_json::to_string_pretty(&records)?);
        }
    }

    Ok(())
}
