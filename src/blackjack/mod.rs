//! Blackjack round simulation
//!
//! The simulator owns card dealing, soft/hard ace handling, the dealer's
//! fixed play-out policy, terminal detection, and the state encoding that
//! the tabular estimators key their tables by.

pub mod card;
pub mod game;
pub mod hand;
pub mod state;

pub use card::{Card, DECK_SIZE, Rank, Suit};
pub use game::Game;
pub use hand::Hand;
pub use state::{Action, STATE_COUNT, State};
