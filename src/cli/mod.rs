//! CLI infrastructure for the Blackjack estimation toolkit
//!
//! Provides the command-line driver for training the tabular estimators,
//! evaluating learned play, and exporting snapshots for analysis.

pub mod commands;
pub mod output;
