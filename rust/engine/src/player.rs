use crate::cards::Card;
use crate::errors::GameError;
use serde::{Deserialize, Serialize};

/// An action a seat can submit during a betting round.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum PlayerAction {
    /// Fold and forfeit the hand
    Fold,
    /// Check (only valid when the player's bet already matches)
    Check,
    /// Call the current bet, going all-in if short
    Call,
    /// Raise the current bet to the given total
    Raise(u32),
    /// Push every remaining chip
    AllIn,
}

/// Default starting stack size for each player in chips
pub const STARTING_STACK: u32 = 1_000;

/// A seat's chips, bets and cards.
///
/// Chip movement goes through [`Player::commit`], which keeps `bet`,
/// `total_bet` and `chips` in step and flips `all_in` once the stack is
/// empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Stable identifier supplied by the caller
    id: u32,
    /// Chips behind (not yet committed)
    chips: u32,
    /// Committed on the current street
    bet: u32,
    /// Committed over the whole hand
    total_bet: u32,
    /// Hole cards, dealt at the start of a hand
    hole: Option<[Card; 2]>,
    folded: bool,
    all_in: bool,
    /// Acted since the last bet increase on this street
    #[serde(skip)]
    acted: bool,
}

impl Player {
    pub fn new(id: u32, chips: u32) -> Result<Self, GameError> {
        if chips == 0 {
            return Err(GameError::InvalidConfiguration(format!(
                "player {} needs a positive starting stack",
                id
            )));
        }
        Ok(Self {
            id,
            chips,
            bet: 0,
            total_bet: 0,
            hole: None,
            folded: false,
            all_in: false,
            acted: false,
        })
    }

    pub fn id(&self) -> u32 {
        self.id
    }
    pub fn chips(&self) -> u32 {
        self.chips
    }
    pub fn bet(&self) -> u32 {
        self.bet
    }
    pub fn total_bet(&self) -> u32 {
        self.total_bet
    }
    pub fn hole_cards(&self) -> Option<[Card; 2]> {
        self.hole
    }
    pub fn is_folded(&self) -> bool {
        self.folded
    }
    pub fn is_all_in(&self) -> bool {
        self.all_in
    }

    /// Still contesting the pot.
    pub fn is_live(&self) -> bool {
        !self.folded
    }

    /// Can still be asked to act on this street.
    pub fn can_act(&self) -> bool {
        !self.folded && !self.all_in
    }

    pub(crate) fn has_acted(&self) -> bool {
        self.acted
    }

    pub(crate) fn set_acted(&mut self, acted: bool) {
        self.acted = acted;
    }

    /// Clears per-hand state; a player with no chips sits the hand out.
    pub(crate) fn reset_for_hand(&mut self) {
        self.bet = 0;
        self.total_bet = 0;
        self.hole = None;
        self.folded = self.chips == 0;
        self.all_in = false;
        self.acted = false;
    }

    pub(crate) fn reset_for_street(&mut self) {
        self.bet = 0;
        self.acted = false;
    }

    pub(crate) fn clear_total_bet(&mut self) {
        self.total_bet = 0;
    }

    pub(crate) fn deal(&mut self, cards: [Card; 2]) {
        self.hole = Some(cards);
    }

    pub(crate) fn fold(&mut self) {
        self.folded = true;
    }

    /// Moves `amount` from the stack into the current bet.
    /// Callers validate the amount first; it is clamped to the stack.
    pub(crate) fn commit(&mut self, amount: u32) -> u32 {
        let paid = amount.min(self.chips);
        self.chips -= paid;
        self.bet += paid;
        self.total_bet += paid;
        if self.chips == 0 {
            self.all_in = true;
        }
        paid
    }

    pub(crate) fn add_chips(&mut self, amount: u32) {
        self.chips = self.chips.saturating_add(amount);
    }
}
