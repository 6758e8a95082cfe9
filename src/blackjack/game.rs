//! One round of Blackjack and its episode drivers

use rand::{SeedableRng, rngs::StdRng};

use super::{
    card::Card,
    hand::Hand,
    state::{Action, State},
};

fn build_rng(seed: Option<u64>) -> StdRng {
    if let Some(seed) = seed {
        StdRng::seed_from_u64(seed)
    } else {
        StdRng::from_rng(&mut rand::rng())
    }
}

/// Simulator for one round of Blackjack.
///
/// Owns the card dealing, both hands, the dealer's fixed play-out policy,
/// terminal detection, and cumulative win/loss counters. All randomness in
/// the crate flows through the single `StdRng` held here, and cards are
/// always drawn in the same order (user, dealer, user, dealer at the deal,
/// then hit and dealer catch-up cards in play order), so a seeded game
/// replays bit-for-bit.
///
/// `act_hit` and `act_stand` are not guarded against being called on a
/// finished round; callers must check [`Game::game_over`] first.
#[derive(Debug)]
pub struct Game {
    user: Hand,
    dealer: Hand,
    dealer_first: u32,
    stand: bool,
    state: State,
    wins: u64,
    losses: u64,
    rng: StdRng,
}

impl Game {
    pub fn new() -> Self {
        Self::with_rng(build_rng(None))
    }

    pub fn from_seed(seed: u64) -> Self {
        Self::with_rng(build_rng(Some(seed)))
    }

    fn with_rng(rng: StdRng) -> Self {
        let mut game = Game {
            user: Hand::new(),
            dealer: Hand::new(),
            dealer_first: 0,
            stand: false,
            state: State::Win,
            wins: 0,
            losses: 0,
            rng,
        };
        game.reset();
        game
    }

    /// Start a new round: clear both hands, then deal two cards to each side
    /// in strict user, dealer, user, dealer order.
    pub fn reset(&mut self) {
        self.user.clear();
        self.dealer.clear();
        self.stand = false;

        self.user.push(Card::draw(&mut self.rng));
        let dealer_first = Card::draw(&mut self.rng);
        self.dealer_first = dealer_first.value();
        self.dealer.push(dealer_first);
        self.user.push(Card::draw(&mut self.rng));
        self.dealer.push(Card::draw(&mut self.rng));

        self.state = self.derive_state();
    }

    /// Current state visible to the player
    pub fn state(&self) -> State {
        self.state
    }

    pub fn user_cards(&self) -> &[Card] {
        self.user.cards()
    }

    pub fn dealer_cards(&self) -> &[Card] {
        self.dealer.cards()
    }

    pub fn wins(&self) -> u64 {
        self.wins
    }

    pub fn losses(&self) -> u64 {
        self.losses
    }

    pub(crate) fn rng_mut(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    /// Derive the state from the hands, in precedence order: a natural 21
    /// wins outright unless the dealer also holds 21; a bust loses; after a
    /// stand the frozen totals are compared, with ties losing for the user
    /// (there is no push outcome); otherwise the round is still ongoing.
    fn derive_state(&self) -> State {
        let user_total = self.user.actual_total();
        let dealer_total = self.dealer.actual_total();

        if user_total == 21 {
            return if dealer_total == 21 {
                State::Lose
            } else {
                State::Win
            };
        }
        if user_total > 21 {
            return State::Lose;
        }
        if self.stand {
            return if dealer_total > 21 || user_total > dealer_total {
                State::Win
            } else {
                State::Lose
            };
        }
        State::Ongoing {
            user_sum: self.user.raw_sum(),
            active_ace: self.user.ace_active(),
            dealer_first: self.dealer_first,
        }
    }

    pub fn game_over(&self) -> bool {
        self.stand || self.state.is_terminal()
    }

    /// Deal one card to the player and recompute the state.
    /// Precondition: the round is not over.
    pub fn act_hit(&mut self) {
        let card = Card::draw(&mut self.rng);
        self.user.push(card);
        self.state = self.derive_state();
    }

    /// The player stands: the dealer plays to completion, then the round
    /// freezes. The dealer stops immediately on a natural 21 and otherwise
    /// draws while it is both behind the player's total and below 17.
    /// Precondition: the round is not over.
    pub fn act_stand(&mut self) {
        let user_total = self.user.actual_total();
        if self.dealer.actual_total() != 21 {
            while self.dealer.actual_total() < user_total && self.dealer.actual_total() < 17 {
                let card = Card::draw(&mut self.rng);
                self.dealer.push(card);
            }
        }
        self.stand = true;
        self.state = self.derive_state();
    }

    /// 0 while the round is live, +1 on a win, -1 on any other finished round
    pub fn check_reward(&self) -> i32 {
        if !self.game_over() {
            return 0;
        }
        if self.state == State::Win { 1 } else { -1 }
    }

    /// Fold the current terminal state into the cumulative win/loss counters
    pub fn update_stats(&mut self) {
        match self.state {
            State::Win => self.wins += 1,
            State::Lose => self.losses += 1,
            State::Ongoing { .. } => {}
        }
    }

    /// Run the round to completion under `policy`, recording `(state, reward)`
    /// at every step including the final terminal state. Each call consumes
    /// the round's current state; reset before reuse.
    pub fn simulate_sequence(&mut self, policy: impl Fn(State) -> Action) -> Vec<(State, i32)> {
        let mut episode = Vec::new();
        while !self.game_over() {
            episode.push((self.state, self.check_reward()));
            match policy(self.state) {
                Action::Hit => self.act_hit(),
                Action::Stand => self.act_stand(),
            }
        }
        episode.push((self.state, self.check_reward()));
        episode
    }

    /// Apply one action and return the new state with its reward. On an
    /// already-finished round this returns `(None, reward)` without touching
    /// the simulator, marking the terminal exit.
    pub fn simulate_one_step(&mut self, action: Action) -> (Option<State>, i32) {
        if self.game_over() {
            return (None, self.check_reward());
        }
        match action {
            Action::Hit => self.act_hit(),
            Action::Stand => self.act_stand(),
        }
        (Some(self.state), self.check_reward())
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}
