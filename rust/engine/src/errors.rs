use thiserror::Error;

/// Everything the engine can refuse to do.
///
/// `IllegalAction` is recoverable: nothing was mutated and the caller may
/// retry with a legal action. `DeckExhausted` is an invariant violation that
/// ends the current hand.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("Illegal action: {0}")]
    IllegalAction(#[from] IllegalAction),
    #[error("Deck exhausted")]
    DeckExhausted,
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("Invalid cards: {0}")]
    InvalidCards(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum IllegalAction {
    #[error("No hand in progress")]
    NoHandInProgress,
    #[error("A hand is already in progress")]
    HandInProgress,
    #[error("Unknown seat {0}")]
    UnknownSeat(usize),
    #[error("It's not seat {actual}'s turn (expected seat {expected})")]
    NotPlayersTurn { expected: usize, actual: usize },
    #[error("Cannot check facing a bet of {to_call}")]
    CheckFacingBet { to_call: u32 },
    #[error("Raise to {amount} is below the minimum of {minimum}")]
    RaiseBelowMinimum { amount: u32, minimum: u32 },
    #[error("Raise to {amount} needs {needed} chips but only {available} remain")]
    RaiseExceedsStack {
        amount: u32,
        needed: u32,
        available: u32,
    },
    #[error("No chips left to push")]
    NoChipsRemaining,
}

impl GameError {
    pub fn is_recoverable(&self) -> bool {
        matches!(self, GameError::IllegalAction(_))
    }
}
