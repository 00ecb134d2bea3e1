use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::errors::{GameError, IllegalAction};
use crate::player::{Player, PlayerAction};
use crate::rules::{validate_action, ValidatedAction};

/// Most seats a single deck can serve: 22 × 2 hole cards + 5 board + 3 burns.
pub const MAX_PLAYERS: usize = 22;

/// Stage of the current hand.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Stage {
    /// No hand running
    Idle,
    /// Hole cards dealt, blinds posted
    PreFlop,
    /// Three community cards
    Flop,
    /// Fourth community card
    Turn,
    /// Fifth community card
    River,
    /// Hands compared, pot being awarded
    Showdown,
}

impl Stage {
    /// A betting round runs in this stage.
    pub fn is_betting(self) -> bool {
        matches!(self, Stage::PreFlop | Stage::Flop | Stage::Turn | Stage::River)
    }

    /// The street dealt after this one, with how many cards it adds.
    pub fn next_street(self) -> Option<(Stage, usize)> {
        match self {
            Stage::PreFlop => Some((Stage::Flop, 3)),
            Stage::Flop => Some((Stage::Turn, 1)),
            Stage::Turn => Some((Stage::River, 1)),
            _ => None,
        }
    }
}

/// What an accepted action led to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    /// Betting continues with this seat
    NextToAct(usize),
    /// The betting round on this street is over
    StreetComplete,
    /// Everyone else folded; the seat wins without a showdown
    Uncontested(usize),
}

/// Betting state of the table: seats, button, stage, bets and board.
///
/// This type only enforces betting rules. Dealing, showdown and payouts
/// are driven by [`crate::engine::Engine`], which reacts to the
/// [`Progress`] returned by [`GameState::apply`].
#[derive(Debug, Clone)]
pub struct GameState {
    players: Vec<Player>,
    /// Seat holding the dealer button, `None` before the first hand
    dealer: Option<usize>,
    small_blind_seat: usize,
    big_blind_seat: usize,
    stage: Stage,
    /// Highest bet on the current street
    current_bet: u32,
    to_act: Option<usize>,
    community: Vec<Card>,
}

impl GameState {
    pub fn new(players: Vec<Player>) -> Result<Self, GameError> {
        if players.len() < 2 || players.len() > MAX_PLAYERS {
            return Err(GameError::InvalidConfiguration(format!(
                "need 2 to {} players, got {}",
                MAX_PLAYERS,
                players.len()
            )));
        }
        let ids: HashSet<u32> = players.iter().map(|p| p.id()).collect();
        if ids.len() != players.len() {
            return Err(GameError::InvalidConfiguration(
                "player ids must be unique".into(),
            ));
        }
        // chips only move between seats, so the table total bounds every pot
        let total = players
            .iter()
            .try_fold(0u32, |acc, p| acc.checked_add(p.chips()));
        if total.is_none() {
            return Err(GameError::InvalidConfiguration(format!(
                "combined stacks exceed {} chips",
                u32::MAX
            )));
        }
        Ok(Self {
            players,
            dealer: None,
            small_blind_seat: 0,
            big_blind_seat: 0,
            stage: Stage::Idle,
            current_bet: 0,
            to_act: None,
            community: Vec::with_capacity(5),
        })
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }
    pub fn player(&self, seat: usize) -> Option<&Player> {
        self.players.get(seat)
    }
    pub fn stage(&self) -> Stage {
        self.stage
    }
    pub fn current_bet(&self) -> u32 {
        self.current_bet
    }
    pub fn to_act(&self) -> Option<usize> {
        self.to_act
    }
    pub fn community(&self) -> &[Card] {
        &self.community
    }
    pub fn dealer(&self) -> Option<usize> {
        self.dealer
    }
    pub fn small_blind_seat(&self) -> usize {
        self.small_blind_seat
    }
    pub fn big_blind_seat(&self) -> usize {
        self.big_blind_seat
    }

    /// Everything committed this hand.
    pub fn pot(&self) -> u32 {
        self.players.iter().map(|p| p.total_bet()).sum()
    }

    /// Chips behind plus chips in the pot; constant within a hand.
    pub fn total_chips(&self) -> u32 {
        self.players.iter().map(|p| p.chips()).sum::<u32>() + self.pot()
    }

    pub fn funded_count(&self) -> usize {
        self.players.iter().filter(|p| p.chips() > 0).count()
    }

    pub fn live_count(&self) -> usize {
        self.players.iter().filter(|p| p.is_live()).count()
    }

    pub fn actor_count(&self) -> usize {
        self.players.iter().filter(|p| p.can_act()).count()
    }

    /// The only live seat, if everyone else has folded.
    pub fn sole_survivor(&self) -> Option<usize> {
        if self.live_count() == 1 {
            self.players.iter().position(|p| p.is_live())
        } else {
            None
        }
    }

    /// First seat after `from` (clockwise, wrapping, `from` itself last)
    /// that satisfies `pred`.
    fn next_seat_where<F: Fn(&Player) -> bool>(&self, from: usize, pred: F) -> Option<usize> {
        let n = self.players.len();
        (1..=n)
            .map(|step| (from + step) % n)
            .find(|&seat| pred(&self.players[seat]))
    }

    pub fn next_actor(&self, from: usize) -> Option<usize> {
        self.next_seat_where(from, Player::can_act)
    }

    pub(crate) fn reset_for_hand(&mut self) {
        for p in &mut self.players {
            p.reset_for_hand();
        }
        self.community.clear();
        self.current_bet = 0;
        self.to_act = None;
    }

    /// Moves the button to the next funded seat and derives the blinds from
    /// it. With every seat funded this is dealer+1 / dealer+2.
    pub(crate) fn rotate_button(&mut self) {
        let funded = |p: &Player| p.chips() > 0;
        let start = self.dealer.unwrap_or(self.players.len() - 1);
        let dealer = self.next_seat_where(start, funded).unwrap_or(0);
        let sb = self.next_seat_where(dealer, funded).unwrap_or(dealer);
        let bb = self.next_seat_where(sb, funded).unwrap_or(sb);
        self.dealer = Some(dealer);
        self.small_blind_seat = sb;
        self.big_blind_seat = bb;
    }

    /// Seats in dealing order: left of the dealer, around the table,
    /// skipping seats sitting the hand out.
    pub(crate) fn deal_order(&self) -> Vec<usize> {
        let n = self.players.len();
        let dealer = self.dealer.unwrap_or(0);
        (1..=n)
            .map(|step| (dealer + step) % n)
            .filter(|&seat| self.players[seat].is_live())
            .collect()
    }

    pub(crate) fn deal_hole(&mut self, seat: usize, cards: [Card; 2]) {
        if let Some(p) = self.players.get_mut(seat) {
            p.deal(cards);
        }
    }

    /// Posts a forced bet. A stack no larger than the blind goes all-in.
    pub(crate) fn post_blind(&mut self, seat: usize, amount: u32) -> u32 {
        self.players
            .get_mut(seat)
            .map(|p| p.commit(amount))
            .unwrap_or(0)
    }

    pub(crate) fn open_preflop(&mut self) {
        let sb = self.players[self.small_blind_seat].bet();
        let bb = self.players[self.big_blind_seat].bet();
        self.current_bet = sb.max(bb);
        self.stage = Stage::PreFlop;
        self.to_act = self.next_actor(self.big_blind_seat);
    }

    /// Adds a street's cards and opens its betting round left of the dealer.
    pub(crate) fn start_street(&mut self, stage: Stage, cards: &[Card]) {
        self.community.extend_from_slice(cards);
        for p in &mut self.players {
            p.reset_for_street();
        }
        self.current_bet = 0;
        self.stage = stage;
        self.to_act = self.next_actor(self.dealer.unwrap_or(0));
    }

    pub(crate) fn set_stage(&mut self, stage: Stage) {
        self.stage = stage;
        if !stage.is_betting() {
            self.to_act = None;
        }
    }

    pub(crate) fn award(&mut self, seat: usize, amount: u32) {
        if let Some(p) = self.players.get_mut(seat) {
            p.add_chips(amount);
        }
    }

    /// Empties the pot after it has been paid out.
    pub(crate) fn clear_contributions(&mut self) {
        for p in &mut self.players {
            p.reset_for_street();
            p.clear_total_bet();
        }
        self.current_bet = 0;
    }

    /// True once betting on this street is settled.
    ///
    /// Settled means one live player left, or every player who can still
    /// act has acted since the last increase and matched the bet, or at most
    /// one such player remains and already covers the bet.
    pub fn is_round_complete(&self) -> bool {
        if self.live_count() <= 1 {
            return true;
        }
        let actors: Vec<&Player> = self.players.iter().filter(|p| p.can_act()).collect();
        match actors.as_slice() {
            [] => true,
            [only] if only.bet() >= self.current_bet => true,
            _ => actors
                .iter()
                .all(|p| p.has_acted() && p.bet() == self.current_bet),
        }
    }

    /// Applies an action for `seat`, the seat to act.
    ///
    /// Validation happens before anything changes, so a rejected action
    /// leaves the table exactly as it was.
    pub fn apply(
        &mut self,
        seat: usize,
        action: PlayerAction,
    ) -> Result<(ValidatedAction, Progress), GameError> {
        if !self.stage.is_betting() {
            return Err(IllegalAction::NoHandInProgress.into());
        }
        let player = self
            .players
            .get(seat)
            .ok_or(IllegalAction::UnknownSeat(seat))?;
        let expected = self.to_act.ok_or(IllegalAction::NoHandInProgress)?;
        if seat != expected {
            return Err(IllegalAction::NotPlayersTurn {
                expected,
                actual: seat,
            }
            .into());
        }
        let validated = validate_action(player.chips(), player.bet(), self.current_bet, action)?;

        let player = &mut self.players[seat];
        let mut raised = false;
        match validated {
            ValidatedAction::Fold => player.fold(),
            ValidatedAction::Check => {}
            ValidatedAction::Call(amount) | ValidatedAction::AllIn(amount) => {
                player.commit(amount);
            }
            ValidatedAction::Raise { pay, .. } => {
                player.commit(pay);
            }
        }
        player.set_acted(true);
        if player.bet() > self.current_bet {
            self.current_bet = player.bet();
            raised = true;
        }
        if raised {
            // everyone else must respond to the new bet
            for (i, p) in self.players.iter_mut().enumerate() {
                if i != seat {
                    p.set_acted(false);
                }
            }
        }

        let progress = if let Some(winner) = self.sole_survivor() {
            self.to_act = None;
            Progress::Uncontested(winner)
        } else if self.is_round_complete() {
            self.to_act = None;
            Progress::StreetComplete
        } else {
            match self.next_actor(seat) {
                Some(next) => {
                    self.to_act = Some(next);
                    Progress::NextToAct(next)
                }
                None => {
                    self.to_act = None;
                    Progress::StreetComplete
                }
            }
        };
        Ok((validated, progress))
    }
}
