//! Per-round hand bookkeeping

use serde::{Deserialize, Serialize};

use super::card::Card;

/// One side's cards within a round.
///
/// Stores the dealt cards, the raw ace-as-1 sum, and the ace count. The
/// active-ace flag and the actual total are derived on every query rather
/// than cached, so they can never go stale after a card is added.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Hand {
    cards: Vec<Card>,
    raw_sum: u32,
    aces: u32,
}

impl Hand {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.cards.clear();
        self.raw_sum = 0;
        self.aces = 0;
    }

    pub fn push(&mut self, card: Card) {
        self.raw_sum += card.value();
        if card.is_ace() {
            self.aces += 1;
        }
        self.cards.push(card);
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Sum of card values with every ace counted as 1
    pub fn raw_sum(&self) -> u32 {
        self.raw_sum
    }

    pub fn has_ace(&self) -> bool {
        self.aces > 0
    }

    /// An ace is active (counted as 11) iff the hand holds one and upgrading
    /// it does not bust. At most one ace can ever be active, so hands with
    /// several aces are indistinguishable from single-ace hands here.
    pub fn ace_active(&self) -> bool {
        self.aces > 0 && self.raw_sum + 10 <= 21
    }

    /// Raw sum plus 10 when an ace is active
    pub fn actual_total(&self) -> u32 {
        self.raw_sum + if self.ace_active() { 10 } else { 0 }
    }
}
