use serde::{Deserialize, Serialize};

use crate::errors::{GameError, IllegalAction};
use crate::player::PlayerAction as A;

/// An action that passed validation, carrying the chips it moves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidatedAction {
    Fold,
    Check,
    /// Pays the amount owed (may be zero)
    Call(u32),
    /// Raises the table bet to `to`, paying `pay` from the stack
    Raise { to: u32, pay: u32 },
    /// Pushes the whole remaining stack
    AllIn(u32),
}

/// Smallest legal raise target when the table bet is `current_bet`.
///
/// A raise must at least double the current bet and must exceed it, so an
/// opening bet on a fresh street needs at least one chip.
pub fn min_raise_to(current_bet: u32) -> u32 {
    current_bet.saturating_mul(2).max(current_bet.saturating_add(1))
}

/// Validates a player action against the stack and the table bet.
///
/// # Arguments
///
/// * `stack` - Chips the player has behind
/// * `bet` - What the player has already committed this street
/// * `current_bet` - Highest bet on the table this street
/// * `action` - The action the player wishes to perform
///
/// # Errors
///
/// - [`IllegalAction::CheckFacingBet`] - check while `bet < current_bet`
/// - [`IllegalAction::RaiseBelowMinimum`] - raise target under [`min_raise_to`]
/// - [`IllegalAction::RaiseExceedsStack`] - raise needs more than the stack
/// - [`IllegalAction::NoChipsRemaining`] - all-in with an empty stack
///
/// # Examples
///
/// ```
/// use holdem_engine::rules::{validate_action, ValidatedAction};
/// use holdem_engine::player::PlayerAction;
///
/// // A short call becomes an all-in for the rest of the stack
/// let result = validate_action(60, 0, 100, PlayerAction::Call);
/// assert_eq!(result, Ok(ValidatedAction::AllIn(60)));
///
/// // Raising to 200 over a bet of 100 costs 150 when 50 is already in
/// let result = validate_action(1000, 50, 100, PlayerAction::Raise(200));
/// assert_eq!(result, Ok(ValidatedAction::Raise { to: 200, pay: 150 }));
/// ```
///
/// ```
/// use holdem_engine::rules::validate_action;
/// use holdem_engine::player::PlayerAction;
/// use holdem_engine::errors::{GameError, IllegalAction};
///
/// let result = validate_action(1000, 0, 100, PlayerAction::Raise(150));
/// assert!(matches!(
///     result,
///     Err(GameError::IllegalAction(IllegalAction::RaiseBelowMinimum { .. }))
/// ));
/// ```
pub fn validate_action(
    stack: u32,
    bet: u32,
    current_bet: u32,
    action: A,
) -> Result<ValidatedAction, GameError> {
    let to_call = current_bet.saturating_sub(bet);
    match action {
        A::Fold => Ok(ValidatedAction::Fold),
        A::Check => {
            if to_call == 0 {
                Ok(ValidatedAction::Check)
            } else {
                Err(IllegalAction::CheckFacingBet { to_call }.into())
            }
        }
        A::Call => {
            if stack < to_call {
                Ok(ValidatedAction::AllIn(stack))
            } else {
                Ok(ValidatedAction::Call(to_call))
            }
        }
        A::Raise(amount) => {
            let minimum = min_raise_to(current_bet);
            if amount < minimum {
                return Err(IllegalAction::RaiseBelowMinimum { amount, minimum }.into());
            }
            let needed = amount.saturating_sub(bet);
            if needed > stack {
                return Err(IllegalAction::RaiseExceedsStack {
                    amount,
                    needed,
                    available: stack,
                }
                .into());
            }
            Ok(ValidatedAction::Raise {
                to: amount,
                pay: needed,
            })
        }
        A::AllIn => {
            if stack == 0 {
                Err(IllegalAction::NoChipsRemaining.into())
            } else {
                Ok(ValidatedAction::AllIn(stack))
            }
        }
    }
}

/// Forced bets. The big blind must be at least twice the small blind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Blinds {
    pub small: u32,
    pub big: u32,
}

impl Blinds {
    pub fn new(small: u32, big: u32) -> Result<Self, GameError> {
        let blinds = Self { small, big };
        blinds.validate()?;
        Ok(blinds)
    }

    pub fn validate(&self) -> Result<(), GameError> {
        if self.small == 0 {
            return Err(GameError::InvalidConfiguration(
                "small blind must be > 0".into(),
            ));
        }
        if self.big < self.small.saturating_mul(2) {
            return Err(GameError::InvalidConfiguration(format!(
                "big blind {} must be at least twice the small blind {}",
                self.big, self.small
            )));
        }
        Ok(())
    }
}

impl Default for Blinds {
    fn default() -> Self {
        Self { small: 5, big: 10 }
    }
}
