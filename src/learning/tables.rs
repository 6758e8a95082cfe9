//! Tabular value and visit-count storage for the three estimators

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{
    blackjack::{Action, STATE_COUNT, State},
    error::{Error, Result},
};

/// Discount factor shared by all value calculations
pub const DISCOUNT: f64 = 0.95;

/// Harmonic learning-rate schedule for TD and Q-learning: `10 / (9 + n)` for
/// the n-th visit. The first visit gets a full step (alpha(1) = 1), and the
/// decay satisfies the usual stochastic-approximation convergence conditions.
pub fn alpha(n: u64) -> f64 {
    10.0 / (9.0 + n as f64)
}

/// The seven mappings maintained by the learner, keyed by [`State`] (the
/// Q tables additionally by action index).
///
/// Every table covers the entire enumerable state space from construction,
/// initialized to zero, so a lookup of a reachable state is always defined.
/// Lookups of states outside the fixed domain fail with
/// [`Error::UnknownState`]; entries are never auto-created.
///
/// Invariant: `mc_values[s] == mc_return_sums[s] / mc_counts[s]` whenever the
/// count is positive, and exactly zero otherwise.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValueTables {
    pub(super) mc_values: HashMap<State, f64>,
    pub(super) mc_return_sums: HashMap<State, f64>,
    pub(super) mc_counts: HashMap<State, u64>,
    pub(super) td_values: HashMap<State, f64>,
    pub(super) td_counts: HashMap<State, u64>,
    pub(super) q_values: HashMap<State, [f64; 2]>,
    pub(super) q_counts: HashMap<State, u64>,
}

fn lookup<'a, V>(map: &'a HashMap<State, V>, state: &State) -> Result<&'a V> {
    map.get(state).ok_or_else(|| Error::UnknownState {
        key: state.key(),
    })
}

fn lookup_mut<'a, V>(map: &'a mut HashMap<State, V>, state: &State) -> Result<&'a mut V> {
    map.get_mut(state).ok_or_else(|| Error::UnknownState {
        key: state.key(),
    })
}

impl ValueTables {
    /// Zero-initialized tables over the whole state space
    pub fn new() -> Self {
        let mut tables = ValueTables {
            mc_values: HashMap::with_capacity(STATE_COUNT),
            mc_return_sums: HashMap::with_capacity(STATE_COUNT),
            mc_counts: HashMap::with_capacity(STATE_COUNT),
            td_values: HashMap::with_capacity(STATE_COUNT),
            td_counts: HashMap::with_capacity(STATE_COUNT),
            q_values: HashMap::with_capacity(STATE_COUNT),
            q_counts: HashMap::with_capacity(STATE_COUNT),
        };
        for state in State::all() {
            tables.mc_values.insert(state, 0.0);
            tables.mc_return_sums.insert(state, 0.0);
            tables.mc_counts.insert(state, 0);
            tables.td_values.insert(state, 0.0);
            tables.td_counts.insert(state, 0);
            tables.q_values.insert(state, [0.0, 0.0]);
            tables.q_counts.insert(state, 0);
        }
        tables
    }

    pub fn mc_value(&self, state: &State) -> Result<f64> {
        lookup(&self.mc_values, state).copied()
    }

    pub fn mc_return_sum(&self, state: &State) -> Result<f64> {
        lookup(&self.mc_return_sums, state).copied()
    }

    pub fn mc_count(&self, state: &State) -> Result<u64> {
        lookup(&self.mc_counts, state).copied()
    }

    pub fn td_value(&self, state: &State) -> Result<f64> {
        lookup(&self.td_values, state).copied()
    }

    pub fn td_count(&self, state: &State) -> Result<u64> {
        lookup(&self.td_counts, state).copied()
    }

    /// Q-value pair for a state, indexed by [`Action::index`]
    pub fn q_pair(&self, state: &State) -> Result<[f64; 2]> {
        lookup(&self.q_values, state).copied()
    }

    pub fn q_count(&self, state: &State) -> Result<u64> {
        lookup(&self.q_counts, state).copied()
    }

    /// Fold one sampled return into the running Monte Carlo average:
    /// the return sum and visit count advance together, and the value is
    /// recomputed as their exact quotient.
    pub fn mc_update(&mut self, state: State, return_to_go: f64) -> Result<()> {
        let sum = lookup_mut(&mut self.mc_return_sums, &state)?;
        *sum += return_to_go;
        let sum = *sum;
        let count = lookup_mut(&mut self.mc_counts, &state)?;
        *count += 1;
        let count = *count;
        *lookup_mut(&mut self.mc_values, &state)? = sum / count as f64;
        Ok(())
    }

    /// TD(0) update toward `reward + γ·bootstrap`. The visit count is bumped
    /// first and the step size is `alpha` of the bumped count.
    pub fn td_update(&mut self, state: State, reward: f64, bootstrap: f64) -> Result<()> {
        let count = lookup_mut(&mut self.td_counts, &state)?;
        *count += 1;
        let step = alpha(*count);
        let value = lookup_mut(&mut self.td_values, &state)?;
        *value += step * (reward + DISCOUNT * bootstrap - *value);
        Ok(())
    }

    /// Q-learning update for one state-action pair toward
    /// `reward + γ·bootstrap`, where the bootstrap is the max over the next
    /// state's pair (or zero past the terminal exit). Count bump and step
    /// size work as in [`ValueTables::td_update`].
    pub fn q_update(
        &mut self,
        state: State,
        action: Action,
        reward: f64,
        bootstrap: f64,
    ) -> Result<()> {
        let count = lookup_mut(&mut self.q_counts, &state)?;
        *count += 1;
        let step = alpha(*count);
        let pair = lookup_mut(&mut self.q_values, &state)?;
        let q = &mut pair[action.index()];
        *q += step * (reward + DISCOUNT * bootstrap - *q);
        Ok(())
    }

    /// `max_a Q(s,a)`, the Q-learning bootstrap target
    pub fn max_q(&self, state: &State) -> Result<f64> {
        let pair = self.q_pair(state)?;
        Ok(pair[0].max(pair[1]))
    }

    /// Greedy action over the stored pair; exact ties resolve to Hit, which
    /// is the common case before any learning has happened.
    pub fn greedy_action(&self, state: &State) -> Result<Action> {
        let pair = self.q_pair(state)?;
        Ok(if pair[Action::Stand.index()] > pair[Action::Hit.index()] {
            Action::Stand
        } else {
            Action::Hit
        })
    }
}

impl Default for ValueTables {
    fn default() -> Self {
        Self::new()
    }
}
