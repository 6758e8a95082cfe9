//! Blackjack value estimation by simulation
//!
//! This crate provides:
//! - A Blackjack round simulator with soft/hard ace handling, the dealer's
//!   fixed stand-on-17 policy, and stochastic episode generation
//! - Tabular Monte Carlo, TD(0), and Q-learning value estimation over the
//!   enumerable state space
//! - A reproducible plain-text snapshot format for all learned tables
//! - A CLI for training, evaluating, and exporting estimates

pub mod blackjack;
pub mod cli;
pub mod error;
pub mod learning;

pub use blackjack::{Action, Card, Game, Hand, Rank, STATE_COUNT, State, Suit};
pub use error::{Error, Result};
pub use learning::{Agent, DISCOUNT, EPSILON, ValueTables};
