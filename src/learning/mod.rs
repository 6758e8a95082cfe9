//! Tabular value estimation for Blackjack
//!
//! Three independent estimators over the same enumerable state space:
//!
//! - **Monte Carlo**: averages discounted returns-to-go over full episodes
//!   played with the fixed default policy
//! - **TD(0)**: bootstraps state values one step at a time under the same
//!   policy, with a harmonic step-size schedule
//! - **Q-learning**: off-policy control with ε-greedy exploration over the
//!   learned state-action values
//!
//! All three share one simulator and one random source, so a seeded
//! [`Agent`] replays its training runs exactly. The [`snapshot`] module
//! round-trips all seven value/count tables through a plain-text format.

pub mod agent;
pub mod snapshot;
pub mod tables;

pub use agent::{Agent, EPSILON};
pub use tables::{DISCOUNT, ValueTables, alpha};
