use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::cards::{full_deck, Card};
use crate::errors::GameError;

/// The cards of one hand, dealt front to back.
///
/// Shuffling rebuilds the full 52 cards and applies a Fisher–Yates
/// permutation driven by a seeded ChaCha20 stream, so a seed fixes the
/// whole sequence of deals.
///
/// ```
/// use holdem_engine::deck::Deck;
///
/// let mut a = Deck::new_shuffled(7);
/// let mut b = Deck::new_shuffled(7);
/// assert_eq!(a.draw().unwrap(), b.draw().unwrap());
/// assert_eq!(a.remaining(), 51);
/// ```
#[derive(Debug)]
pub struct Deck {
    cards: Vec<Card>,
    position: usize,
    rng: ChaCha20Rng,
}

impl Deck {
    pub fn new_with_seed(seed: u64) -> Self {
        let rng = ChaCha20Rng::seed_from_u64(seed);
        // Keep initial order until shuffle is called explicitly
        Self {
            cards: full_deck(),
            position: 0,
            rng,
        }
    }

    pub fn new_shuffled(seed: u64) -> Self {
        let mut deck = Self::new_with_seed(seed);
        deck.shuffle();
        deck
    }

    /// A shuffled deck missing every card in `known`.
    pub fn without(known: &[Card], seed: u64) -> Self {
        let mut deck = Self::new_with_seed(seed);
        deck.cards.retain(|c| !known.contains(c));
        deck.cards.shuffle(&mut deck.rng);
        deck
    }

    pub fn shuffle(&mut self) {
        self.cards = full_deck();
        self.cards.shuffle(&mut self.rng);
        self.position = 0;
    }

    /// Reshuffles the cards this deck was built with (see [`Deck::without`]).
    pub fn reshuffle_remaining(&mut self) {
        self.cards.shuffle(&mut self.rng);
        self.position = 0;
    }

    pub fn draw(&mut self) -> Result<Card, GameError> {
        let c = *self
            .cards
            .get(self.position)
            .ok_or(GameError::DeckExhausted)?;
        self.position += 1;
        Ok(c)
    }

    pub fn burn(&mut self) -> Result<(), GameError> {
        self.draw().map(|_| ())
    }

    pub fn remaining(&self) -> usize {
        self.cards.len().saturating_sub(self.position)
    }
}
