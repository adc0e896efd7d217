use crate::cards::{Card, Rank, Suit};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// A standard 52-card deck with a dealing cursor.
///
/// The deck owns its RNG, so a seeded deck replays the same sequence of shuffles
/// across every `reset`.
///
/// ```
/// use holdem_table::deck::Deck;
///
/// let mut a = Deck::with_seed(42);
/// let mut b = Deck::with_seed(42);
/// assert_eq!(a.deal(5), b.deal(5));
/// assert_eq!(a.remaining(), 47);
/// ```
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
    next: usize,
    rng: ChaCha8Rng,
}

impl Deck {
    /// Fresh shuffled deck driven by the given RNG.
    pub fn with_rng(rng: ChaCha8Rng) -> Self {
        let mut deck = Self { cards: Self::ordered(), next: 0, rng };
        deck.shuffle();
        deck
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(ChaCha8Rng::seed_from_u64(seed))
    }

    /// Deck seeded from the thread-local generator.
    pub fn from_entropy() -> Self {
        let seed: u64 = rand::rng().random();
        Self::with_seed(seed)
    }

    fn ordered() -> Vec<Card> {
        let mut cards = Vec::with_capacity(52);
        for s in Suit::ALL {
            for r in Rank::ALL {
                cards.push(Card::new(r, s));
            }
        }
        cards
    }

    /// Fisher-Yates over all 52 cards and rewind the cursor.
    pub fn shuffle(&mut self) {
        self.cards.shuffle(&mut self.rng);
        self.next = 0;
    }

    /// Return to a freshly shuffled 52-card state.
    pub fn reset(&mut self) {
        self.cards = Self::ordered();
        self.shuffle();
    }

    /// Cards not yet dealt or burned.
    pub fn remaining(&self) -> usize {
        self.cards.len() - self.next
    }

    /// Deal the next `n` cards, or `None` (dealing nothing) if fewer remain.
    pub fn deal(&mut self, n: usize) -> Option<Vec<Card>> {
        if n > self.remaining() {
            return None;
        }
        let out = self.cards[self.next..self.next + n].to_vec();
        self.next += n;
        Some(out)
    }

    /// Discard the next card. Burning an empty deck is a no-op.
    pub fn burn(&mut self) {
        if self.next < self.cards.len() {
            self.next += 1;
        }
    }
}
