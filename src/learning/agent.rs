//! The learner: drives the simulator through episodes and maintains the
//! Monte Carlo, TD(0), and Q-learning estimators

use std::path::Path;

use rand::Rng;

use crate::{
    blackjack::{Action, Game, State},
    error::Result,
};

use super::{
    snapshot,
    tables::{DISCOUNT, ValueTables},
};

/// Exploration rate for the ε-greedy Q-learning action picks
pub const EPSILON: f64 = 0.4;

/// Tabular learner over the Blackjack state space.
///
/// Owns one [`Game`] simulator and the three independent estimators. The run
/// methods each play a caller-supplied batch of episodes, so a driver loop
/// can interleave training with other work by calling them repeatedly.
#[derive(Debug)]
pub struct Agent {
    tables: ValueTables,
    simulator: Game,
}

impl Agent {
    pub fn new() -> Self {
        Agent {
            tables: ValueTables::new(),
            simulator: Game::new(),
        }
    }

    /// Agent whose simulator (and therefore every random draw, including the
    /// ε-greedy picks) replays deterministically for a given seed
    pub fn from_seed(seed: u64) -> Self {
        Agent {
            tables: ValueTables::new(),
            simulator: Game::from_seed(seed),
        }
    }

    pub fn tables(&self) -> &ValueTables {
        &self.tables
    }

    pub fn simulator(&self) -> &Game {
        &self.simulator
    }

    /// Fixed policy used by the MC and TD estimators: hit below an actual
    /// total of 14, stand otherwise. Deterministic and state-only.
    pub fn default_policy(state: State) -> Action {
        if state.player_total() < 14 {
            Action::Hit
        } else {
            Action::Stand
        }
    }

    /// Monte Carlo estimation over `episodes` full episodes.
    ///
    /// Every occurrence of a state in an episode is updated with the
    /// discounted return-to-go from that occurrence (first-visit filtering is
    /// deliberately not applied), and the terminal state itself receives its
    /// own reward as a return.
    pub fn mc_run(&mut self, episodes: usize) -> Result<()> {
        for _ in 0..episodes {
            self.simulator.reset();
            let episode = self.simulator.simulate_sequence(Self::default_policy);

            // Discounted suffix sums: G_t = r_t + γ·G_{t+1}.
            let mut returns = vec![0.0; episode.len()];
            let mut tail = 0.0;
            for (t, &(_, reward)) in episode.iter().enumerate().rev() {
                tail = f64::from(reward) + DISCOUNT * tail;
                returns[t] = tail;
            }

            for (t, &(state, _)) in episode.iter().enumerate() {
                self.tables.mc_update(state, returns[t])?;
            }
        }
        Ok(())
    }

    /// TD(0) estimation over `episodes` episodes under the default policy.
    ///
    /// The walk starts from the freshly dealt state and carries each state's
    /// own arrival reward into its update. Terminal states are updated like
    /// any other, with the exit marker (`None`) contributing a zero
    /// bootstrap.
    pub fn td_run(&mut self, episodes: usize) -> Result<()> {
        for _ in 0..episodes {
            self.simulator.reset();
            let mut current = Some(self.simulator.state());
            let mut reward = f64::from(self.simulator.check_reward());

            while let Some(state) = current {
                let (next, next_reward) =
                    self.simulator.simulate_one_step(Self::default_policy(state));
                let bootstrap = match &next {
                    Some(next_state) => self.tables.td_value(next_state)?,
                    None => 0.0,
                };
                self.tables.td_update(state, reward, bootstrap)?;
                reward = f64::from(next_reward);
                current = next;
            }
        }
        Ok(())
    }

    /// Q-learning over `episodes` episodes with ε-greedy exploration
    /// (ε = [`EPSILON`]).
    ///
    /// Same walk structure as [`Agent::td_run`], except the action comes from
    /// the ε-greedy policy over the current Q estimates and the bootstrap is
    /// the max over the next state's pair. The action pick consults the
    /// random source even on the final terminal state, so seeded traces
    /// include that draw.
    pub fn q_run(&mut self, episodes: usize) -> Result<()> {
        for _ in 0..episodes {
            self.simulator.reset();
            let mut current = Some(self.simulator.state());
            let mut reward = f64::from(self.simulator.check_reward());

            while let Some(state) = current {
                let action = self.pick_action(&state, EPSILON)?;
                let (next, next_reward) = self.simulator.simulate_one_step(action);
                let bootstrap = match &next {
                    Some(next_state) => self.tables.max_q(next_state)?,
                    None => 0.0,
                };
                self.tables.q_update(state, action, reward, bootstrap)?;
                reward = f64::from(next_reward);
                current = next;
            }
        }
        Ok(())
    }

    /// ε-greedy pick over the current Q estimates. Draws come from the same
    /// random source as the card deals, preserving single-source determinism.
    fn pick_action(&mut self, state: &State, epsilon: f64) -> Result<Action> {
        let rng = self.simulator.rng_mut();
        if rng.random::<f64>() < epsilon {
            let index = rng.random_range(0..Action::ALL.len());
            Ok(Action::from_index(index))
        } else {
            self.tables.greedy_action(state)
        }
    }

    /// Learned decision for a front-end's autoplay mode: the action with the
    /// larger Q-value, with exact ties going to Hit (before any learning all
    /// Q-values are zero, so a fresh agent always hits).
    pub fn autoplay_decision(&self, state: &State) -> Result<Action> {
        let pair = self.tables.q_pair(state)?;
        Ok(if pair[Action::Stand.index()] > pair[Action::Hit.index()] {
            Action::Stand
        } else {
            Action::Hit
        })
    }

    /// Play one full round under [`Agent::autoplay_decision`], fold the
    /// outcome into the simulator's win/loss counters, and return the
    /// terminal reward.
    pub fn autoplay_round(&mut self) -> Result<i32> {
        self.simulator.reset();
        while !self.simulator.game_over() {
            match self.autoplay_decision(&self.simulator.state())? {
                Action::Hit => self.simulator.act_hit(),
                Action::Stand => self.simulator.act_stand(),
            }
        }
        self.simulator.update_stats();
        Ok(self.simulator.check_reward())
    }

    /// Write all seven tables to `path` in the reproducible text format
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        snapshot::save(&self.tables, path)
    }

    /// Replace all seven tables with the contents of `path`. Fails fast on
    /// malformed input and leaves the current tables untouched on error.
    pub fn load<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        self.tables = snapshot::load(path)?;
        Ok(())
    }
}

impl Default for Agent {
    fn default() -> Self {
        Self::new()
    }
}
