//! State and action spaces for the Blackjack value tables

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A player action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    Hit,
    Stand,
}

impl Action {
    pub const ALL: [Action; 2] = [Action::Hit, Action::Stand];

    /// Table index of the action: Hit is 0, Stand is 1
    pub fn index(self) -> usize {
        match self {
            Action::Hit => 0,
            Action::Stand => 1,
        }
    }

    /// Inverse of [`Action::index`]; 0 maps to Hit, anything else to Stand
    pub fn from_index(index: usize) -> Action {
        if index == 0 { Action::Hit } else { Action::Stand }
    }
}

/// A state visible to the player.
///
/// Ongoing rounds are the triple (raw ace-as-1 card sum, whether an ace is
/// currently counted as 11, dealer's visible card value). Finished rounds
/// collapse into the two terminal sentinels `Win` and `Lose`, which carry no
/// hand information. Equality and hashing are structural.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum State {
    Ongoing {
        /// Sum of the player's card values with every ace counted as 1 (2-20)
        user_sum: u32,
        /// Whether one of the player's aces is currently counted as 11
        active_ace: bool,
        /// Value of the dealer's first-dealt, visible card (1-10)
        dealer_first: u32,
    },
    Win,
    Lose,
}

/// Number of states in the enumerable state space
pub const STATE_COUNT: usize = 2 + 19 * 2 * 10;

impl State {
    pub fn is_terminal(&self) -> bool {
        matches!(self, State::Win | State::Lose)
    }

    /// Actual player total implied by the state: the raw sum plus 10 when an
    /// ace is active. The sentinels evaluate as their key encodings (0 and 1),
    /// which keeps the fixed hit-below-14 policy total on the state space.
    pub fn player_total(&self) -> u32 {
        match *self {
            State::Ongoing {
                user_sum,
                active_ace,
                ..
            } => user_sum + if active_ace { 10 } else { 0 },
            State::Win => 0,
            State::Lose => 1,
        }
    }

    /// Enumerate the whole state space in canonical order: the two sentinels
    /// first, then every triple with the user sum outermost, the ace flag in
    /// the middle, and the dealer card innermost. Snapshots are written in
    /// this order, so it must stay stable.
    pub fn all() -> impl Iterator<Item = State> {
        [State::Win, State::Lose].into_iter().chain(
            (2..=20).flat_map(|user_sum| {
                [false, true].into_iter().flat_map(move |active_ace| {
                    (1..=10).map(move |dealer_first| State::Ongoing {
                        user_sum,
                        active_ace,
                        dealer_first,
                    })
                })
            }),
        )
    }

    /// Textual key used in snapshots: `(i,j,k)` with no internal spaces.
    /// The sentinels encode as `(0,0,0)` (win) and `(1,0,0)` (lose).
    pub fn key(&self) -> String {
        match *self {
            State::Win => "(0,0,0)".to_string(),
            State::Lose => "(1,0,0)".to_string(),
            State::Ongoing {
                user_sum,
                active_ace,
                dealer_first,
            } => format!("({},{},{})", user_sum, active_ace as u8, dealer_first),
        }
    }

    /// Parse a snapshot key back into a state.
    ///
    /// Rejects syntactically broken keys with [`Error::MalformedStateKey`] and
    /// well-formed keys outside the enumerable space with
    /// [`Error::UnknownState`]; states are never invented for unknown keys.
    pub fn parse_key(key: &str) -> Result<State> {
        let malformed = || Error::MalformedStateKey {
            key: key.to_string(),
        };
        let inner = key
            .strip_prefix('(')
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(malformed)?;
        let mut fields = inner.split(',').map(str::parse::<i64>);
        let user_sum = fields.next().ok_or_else(malformed)?.map_err(|_| malformed())?;
        let active_ace = fields.next().ok_or_else(malformed)?.map_err(|_| malformed())?;
        let dealer_first = fields.next().ok_or_else(malformed)?.map_err(|_| malformed())?;
        if fields.next().is_some() {
            return Err(malformed());
        }

        match (user_sum, active_ace, dealer_first) {
            (0, 0, 0) => Ok(State::Win),
            (1, 0, 0) => Ok(State::Lose),
            (2..=20, 0 | 1, 1..=10) => Ok(State::Ongoing {
                user_sum: user_sum as u32,
                active_ace: active_ace == 1,
                dealer_first: dealer_first as u32,
            }),
            _ => Err(Error::UnknownState {
                key: key.to_string(),
            }),
        }
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_space_size() {
        assert_eq!(State::all().count(), STATE_COUNT);
        assert_eq!(STATE_COUNT, 382);
    }

    #[test]
    fn test_sentinels_come_first() {
        let mut states = State::all();
        assert_eq!(states.next(), Some(State::Win));
        assert_eq!(states.next(), Some(State::Lose));
        assert_eq!(
            states.next(),
            Some(State::Ongoing {
                user_sum: 2,
                active_ace: false,
                dealer_first: 1
            })
        );
    }

    #[test]
    fn test_key_round_trip_over_whole_space() {
        for state in State::all() {
            let parsed = State::parse_key(&state.key()).expect("key should parse");
            assert_eq!(parsed, state);
        }
    }

    #[test]
    fn test_parse_rejects_out_of_domain_keys() {
        for key in ["(21,0,5)", "(2,2,5)", "(2,0,0)", "(2,0,11)", "(0,0,1)", "(-3,0,4)"] {
            assert!(matches!(
                State::parse_key(key),
                Err(Error::UnknownState { .. })
            ));
        }
    }

    #[test]
    fn test_parse_rejects_malformed_keys() {
        for key in ["", "(1,2", "1,2,3", "(1,2,3,4)", "(a,b,c)", "(1, 2, 3)"] {
            assert!(matches!(
                State::parse_key(key),
                Err(Error::MalformedStateKey { .. })
            ));
        }
    }

    #[test]
    fn test_player_total_counts_active_ace_as_11() {
        let soft = State::Ongoing {
            user_sum: 6,
            active_ace: true,
            dealer_first: 9,
        };
        let hard = State::Ongoing {
            user_sum: 6,
            active_ace: false,
            dealer_first: 9,
        };
        assert_eq!(soft.player_total(), 16);
        assert_eq!(hard.player_total(), 6);
    }

    #[test]
    fn test_action_indices() {
        assert_eq!(Action::Hit.index(), 0);
        assert_eq!(Action::Stand.index(), 1);
        assert_eq!(Action::from_index(0), Action::Hit);
        assert_eq!(Action::from_index(1), Action::Stand);
    }
}
