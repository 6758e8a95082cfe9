//! The 52-card deck and per-card value lookup

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Card rank, ace through king
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rank {
    Ace,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
}

impl Rank {
    pub const ALL: [Rank; 13] = [
        Rank::Ace,
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
    ];

    /// Blackjack value of the rank, with the ace counted as 1
    pub fn value(self) -> u32 {
        match self {
            Rank::Ace => 1,
            Rank::Two => 2,
            Rank::Three => 3,
            Rank::Four => 4,
            Rank::Five => 5,
            Rank::Six => 6,
            Rank::Seven => 7,
            Rank::Eight => 8,
            Rank::Nine => 9,
            Rank::Ten | Rank::Jack | Rank::Queen | Rank::King => 10,
        }
    }

    pub fn is_ace(self) -> bool {
        self == Rank::Ace
    }
}

/// Card suit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Suit {
    Clubs,
    Spades,
    Diamonds,
    Hearts,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Clubs, Suit::Spades, Suit::Diamonds, Suit::Hearts];
}

/// Number of distinct cards in the deck
pub const DECK_SIZE: usize = Rank::ALL.len() * Suit::ALL.len();

/// A playing card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    /// Draw one card uniformly at random from the full 52-card deck.
    ///
    /// Draws never deplete a shared deck: every draw is an independent
    /// uniform sample over all 52 cards, so cards can repeat across draws.
    pub fn draw(rng: &mut impl Rng) -> Card {
        let index = rng.random_range(0..DECK_SIZE);
        Card {
            rank: Rank::ALL[index / Suit::ALL.len()],
            suit: Suit::ALL[index % Suit::ALL.len()],
        }
    }

    pub fn value(self) -> u32 {
        self.rank.value()
    }

    pub fn is_ace(self) -> bool {
        self.rank.is_ace()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn test_rank_values() {
        assert_eq!(Rank::Ace.value(), 1);
        assert_eq!(Rank::Nine.value(), 9);
        assert_eq!(Rank::Ten.value(), 10);
        assert_eq!(Rank::Jack.value(), 10);
        assert_eq!(Rank::Queen.value(), 10);
        assert_eq!(Rank::King.value(), 10);
    }

    #[test]
    fn test_deck_size_is_52() {
        assert_eq!(DECK_SIZE, 52);
    }

    #[test]
    fn test_draws_are_seed_deterministic() {
        let mut a = StdRng::seed_from_u64(17);
        let mut b = StdRng::seed_from_u64(17);
        for _ in 0..100 {
            assert_eq!(Card::draw(&mut a), Card::draw(&mut b));
        }
    }

    #[test]
    fn test_draws_cover_all_values() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut seen = [false; 11];
        for _ in 0..10_000 {
            seen[Card::draw(&mut rng).value() as usize] = true;
        }
        for value in 1..=10 {
            assert!(seen[value], "value {value} never drawn");
        }
    }
}
