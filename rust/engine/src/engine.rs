use std::fmt;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, info, warn};

use crate::cards::{format_cards, Card};
use crate::deck::Deck;
use crate::equity::{EquityEstimator, EquityReport, TiePolicy};
use crate::errors::{GameError, IllegalAction};
use crate::events::EngineListener;
use crate::game::{GameState, Progress, Stage};
use crate::hand::{best_hand, HandStrength};
use crate::logger::{format_hand_id, ActionRecord, HandRecord, Payout, ShowdownInfo};
use crate::player::{Player, PlayerAction};
use crate::pot::{PotAward, PotManager, PotMode};
use crate::rules::{min_raise_to, Blinds};

/// Table settings fixed for the lifetime of an [`Engine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub small_blind: u32,
    pub big_blind: u32,
    pub pot_mode: PotMode,
    pub tie_policy: TiePolicy,
    /// Fixes every shuffle; a random seed is drawn when absent
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        let blinds = Blinds::default();
        Self {
            small_blind: blinds.small,
            big_blind: blinds.big,
            pot_mode: PotMode::default(),
            tie_policy: TiePolicy::default(),
            seed: None,
        }
    }
}

impl EngineConfig {
    pub fn blinds(&self) -> Blinds {
        Blinds {
            small: self.small_blind,
            big: self.big_blind,
        }
    }

    pub fn validate(&self) -> Result<(), GameError> {
        self.blinds().validate()
    }
}

/// A hand revealed at showdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShowdownHand {
    pub seat: usize,
    pub player_id: u32,
    pub hole: [Card; 2],
    pub strength: HandStrength,
    /// The five cards that make the hand
    pub cards: [Card; 5],
    pub description: String,
}

/// How a finished hand was paid out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoundResult {
    pub hand_no: u32,
    /// Everything that was in the middle
    pub pot: u32,
    /// One entry per pot, main pot first
    pub awards: Vec<PotAward>,
    /// Empty when the hand ended without a showdown
    pub showdown: Vec<ShowdownHand>,
    pub community: Vec<Card>,
    pub uncontested: bool,
}

impl RoundResult {
    /// Every seat that won chips, in award then seat order.
    pub fn winners(&self) -> Vec<usize> {
        let mut seats = Vec::new();
        for award in &self.awards {
            for &seat in &award.winners {
                if !seats.contains(&seat) {
                    seats.push(seat);
                }
            }
        }
        seats
    }

    /// Share paid to each winner of the main pot, before the odd chip.
    pub fn share_each(&self) -> u32 {
        self.awards.first().map(|a| a.share).unwrap_or(0)
    }

    pub fn paid_to(&self, seat: usize) -> u32 {
        self.awards.iter().map(|a| a.paid_to(seat)).sum()
    }
}

/// A seat as seen by one observer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerView {
    pub seat: usize,
    pub id: u32,
    pub chips: u32,
    pub bet: u32,
    pub total_bet: u32,
    pub folded: bool,
    pub all_in: bool,
    /// `None` unless the observer may see these cards
    pub hole: Option<[Card; 2]>,
}

/// Snapshot of the table with other players' hole cards hidden.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableView {
    pub stage: Stage,
    pub community: Vec<Card>,
    pub pot: u32,
    pub current_bet: u32,
    pub dealer: Option<usize>,
    pub small_blind_seat: usize,
    pub big_blind_seat: usize,
    pub to_act: Option<usize>,
    pub players: Vec<PlayerView>,
}

/// Runs hands from the deal to the payout.
///
/// The engine owns the deck and the betting state. Callers start a hand
/// with [`Engine::start_new_round`] and then feed actions for the seat to
/// act; dealing the next street, showdown and payouts happen as a side
/// effect of the action that completes a betting round.
///
/// # Examples
///
/// ```
/// use holdem_engine::engine::{Engine, EngineConfig};
/// use holdem_engine::game::Stage;
///
/// let config = EngineConfig { seed: Some(7), ..EngineConfig::default() };
/// let mut engine = Engine::with_stacks(config, &[1000, 1000, 1000]).unwrap();
/// engine.start_new_round().unwrap();
/// assert_eq!(engine.stage(), Stage::PreFlop);
/// assert_eq!(engine.pot(), 15);
///
/// // everyone folds to the big blind
/// let first = engine.to_act().unwrap();
/// engine.fold(first).unwrap();
/// let second = engine.to_act().unwrap();
/// engine.fold(second).unwrap();
///
/// assert_eq!(engine.stage(), Stage::Idle);
/// assert!(engine.last_result().unwrap().uncontested);
/// ```
pub struct Engine {
    config: EngineConfig,
    seed: u64,
    state: GameState,
    deck: Deck,
    equity: EquityEstimator,
    listeners: Vec<Box<dyn EngineListener>>,
    hands_played: u32,
    record: Option<HandRecord>,
    last_record: Option<HandRecord>,
    last_result: Option<RoundResult>,
}

impl fmt::Debug for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("config", &self.config)
            .field("seed", &self.seed)
            .field("state", &self.state)
            .field("hands_played", &self.hands_played)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

impl Engine {
    pub fn new(config: EngineConfig, players: Vec<Player>) -> Result<Self, GameError> {
        config.validate()?;
        let state = GameState::new(players)?;
        let seed = config.seed.unwrap_or_else(rand::random);
        Ok(Self {
            config,
            seed,
            state,
            deck: Deck::new_with_seed(seed),
            equity: EquityEstimator::new(seed.rotate_left(32)).with_policy(config.tie_policy),
            listeners: Vec::new(),
            hands_played: 0,
            record: None,
            last_record: None,
            last_result: None,
        })
    }

    /// Seats one player per stack, with ids `0..n`.
    pub fn with_stacks(config: EngineConfig, stacks: &[u32]) -> Result<Self, GameError> {
        let players = stacks
            .iter()
            .enumerate()
            .map(|(i, &chips)| Player::new(i as u32, chips))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(config, players)
    }

    pub fn add_listener(&mut self, listener: Box<dyn EngineListener>) {
        self.listeners.push(listener);
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
    pub fn seed(&self) -> u64 {
        self.seed
    }
    pub fn state(&self) -> &GameState {
        &self.state
    }
    pub fn stage(&self) -> Stage {
        self.state.stage()
    }
    pub fn pot(&self) -> u32 {
        self.state.pot()
    }
    pub fn players(&self) -> &[Player] {
        self.state.players()
    }
    pub fn community(&self) -> &[Card] {
        self.state.community()
    }
    pub fn to_act(&self) -> Option<usize> {
        self.state.to_act()
    }
    pub fn current_bet(&self) -> u32 {
        self.state.current_bet()
    }
    pub fn hands_played(&self) -> u32 {
        self.hands_played
    }
    pub fn last_result(&self) -> Option<&RoundResult> {
        self.last_result.as_ref()
    }
    /// History of the last finished hand, ready for a [`crate::logger::HandLogger`].
    pub fn last_record(&self) -> Option<&HandRecord> {
        self.last_record.as_ref()
    }

    /// Chips `seat` must add to stay in.
    pub fn to_call(&self, seat: usize) -> u32 {
        self.state
            .player(seat)
            .map(|p| self.state.current_bet().saturating_sub(p.bet()))
            .unwrap_or(0)
    }

    pub fn min_raise_to(&self) -> u32 {
        min_raise_to(self.state.current_bet())
    }

    /// Shuffles, moves the button, deals hole cards and posts the blinds.
    pub fn start_new_round(&mut self) -> Result<(), GameError> {
        if self.state.stage() != Stage::Idle {
            return Err(IllegalAction::HandInProgress.into());
        }
        if self.state.funded_count() < 2 {
            return Err(GameError::InvalidConfiguration(
                "need at least two players with chips".into(),
            ));
        }
        self.state.reset_for_hand();
        self.state.rotate_button();
        self.deck.shuffle();
        self.hands_played += 1;

        // one card at a time, starting left of the button
        let order = self.state.deal_order();
        let mut first = Vec::with_capacity(order.len());
        for _ in &order {
            first.push(self.deck.draw()?);
        }
        for (&seat, &card) in order.iter().zip(&first) {
            let second = self.deck.draw()?;
            self.state.deal_hole(seat, [card, second]);
        }

        let blinds = self.config.blinds();
        let sb = self.state.small_blind_seat();
        let bb = self.state.big_blind_seat();
        self.state.post_blind(sb, blinds.small);
        self.state.post_blind(bb, blinds.big);
        self.state.open_preflop();

        let dealer = self.state.dealer().unwrap_or(0);
        let date = Utc::now().format("%Y%m%d").to_string();
        self.record = Some(HandRecord {
            hand_id: format_hand_id(&date, self.hands_played),
            seed: Some(self.seed),
            dealer,
            blinds,
            actions: Vec::new(),
            board: Vec::new(),
            payouts: Vec::new(),
            result: None,
            ts: None,
            meta: Some(json!({
                "hand_no": self.hands_played,
                "players": order.len(),
                "pot_mode": self.config.pot_mode,
            })),
            showdown: None,
        });
        info!(
            hand = self.hands_played,
            dealer,
            small_blind = sb,
            big_blind = bb,
            players = order.len(),
            "round started"
        );

        self.notify_bet(sb);
        self.notify_bet(bb);
        self.notify_stage();
        if self.state.is_round_complete() {
            // blinds alone put everyone but one player all-in
            self.finish_street()?;
        }
        Ok(())
    }

    /// Applies an action for `seat` and advances the hand as far as it goes.
    ///
    /// A rejected action returns the error and changes nothing.
    pub fn act(&mut self, seat: usize, action: PlayerAction) -> Result<Progress, GameError> {
        let street = self.state.stage();
        let chips_before = self.state.player(seat).map(|p| p.chips()).unwrap_or(0);
        let (validated, progress) = match self.state.apply(seat, action) {
            Ok(applied) => applied,
            Err(e) => {
                warn!(seat, ?action, error = %e, "action rejected");
                return Err(e);
            }
        };
        let chips_after = self.state.player(seat).map(|p| p.chips()).unwrap_or(0);
        let paid = chips_before.saturating_sub(chips_after);
        debug!(seat, ?validated, paid, ?progress, "action applied");

        if let Some(record) = &mut self.record {
            record.actions.push(ActionRecord {
                seat,
                street,
                action,
                paid,
            });
        }
        if paid > 0 {
            self.notify_bet(seat);
        }
        match progress {
            Progress::NextToAct(_) => {}
            Progress::StreetComplete => self.finish_street()?,
            Progress::Uncontested(winner) => self.award_uncontested(winner),
        }
        Ok(progress)
    }

    pub fn fold(&mut self, seat: usize) -> Result<Progress, GameError> {
        self.act(seat, PlayerAction::Fold)
    }

    pub fn check(&mut self, seat: usize) -> Result<Progress, GameError> {
        self.act(seat, PlayerAction::Check)
    }

    pub fn call(&mut self, seat: usize) -> Result<Progress, GameError> {
        self.act(seat, PlayerAction::Call)
    }

    /// Raises the table bet to `amount` (a total, not an increment).
    pub fn raise(&mut self, seat: usize, amount: u32) -> Result<Progress, GameError> {
        self.act(seat, PlayerAction::Raise(amount))
    }

    pub fn all_in(&mut self, seat: usize) -> Result<Progress, GameError> {
        self.act(seat, PlayerAction::AllIn)
    }

    /// `seat` ran out of time on its turn; it folds.
    pub fn force_timeout(&mut self, seat: usize) -> Result<Progress, GameError> {
        let progress = self.fold(seat)?;
        info!(seat, "turn timed out, folded");
        Ok(progress)
    }

    /// Monte-Carlo equity for arbitrary cards, using the engine's seeded estimator.
    pub fn calculate_equity(
        &mut self,
        hole: [Card; 2],
        community: &[Card],
        opponents: usize,
        simulations: u32,
    ) -> Result<EquityReport, GameError> {
        self.equity
            .estimate(hole, community, opponents, simulations)
    }

    /// Equity of `seat`'s hole cards against the other live players on the
    /// current board.
    pub fn seat_equity(&mut self, seat: usize, simulations: u32) -> Result<EquityReport, GameError> {
        let player = self
            .state
            .player(seat)
            .ok_or(IllegalAction::UnknownSeat(seat))?;
        let hole = player
            .hole_cards()
            .ok_or(IllegalAction::NoHandInProgress)?;
        let opponents = self.state.live_count().saturating_sub(1).max(1);
        let community = self.state.community().to_vec();
        self.calculate_equity(hole, &community, opponents, simulations)
    }

    /// The table as `viewer` may see it. Hole cards of other seats are
    /// hidden until showdown; `None` sees no hole cards at all.
    pub fn public_view(&self, viewer: Option<usize>) -> TableView {
        let showdown = self.state.stage() == Stage::Showdown;
        let players = self
            .state
            .players()
            .iter()
            .enumerate()
            .map(|(seat, p)| {
                let visible = viewer == Some(seat) || (showdown && p.is_live());
                PlayerView {
                    seat,
                    id: p.id(),
                    chips: p.chips(),
                    bet: p.bet(),
                    total_bet: p.total_bet(),
                    folded: p.is_folded(),
                    all_in: p.is_all_in(),
                    hole: if visible { p.hole_cards() } else { None },
                }
            })
            .collect();
        TableView {
            stage: self.state.stage(),
            community: self.state.community().to_vec(),
            pot: self.state.pot(),
            current_bet: self.state.current_bet(),
            dealer: self.state.dealer(),
            small_blind_seat: self.state.small_blind_seat(),
            big_blind_seat: self.state.big_blind_seat(),
            to_act: self.state.to_act(),
            players,
        }
    }

    /// Deals streets until someone has to act or the hand is decided.
    fn finish_street(&mut self) -> Result<(), GameError> {
        loop {
            if let Some(winner) = self.state.sole_survivor() {
                self.award_uncontested(winner);
                return Ok(());
            }
            let Some((next, count)) = self.state.stage().next_street() else {
                return self.showdown();
            };
            if let Err(e) = self.deal_street(next, count) {
                self.abort_hand(&e);
                return Err(e);
            }
            self.notify_stage();
            if !self.state.is_round_complete() {
                return Ok(());
            }
            debug!(stage = ?next, "no betting possible, running out the board");
        }
    }

    fn deal_street(&mut self, stage: Stage, count: usize) -> Result<(), GameError> {
        self.deck.burn()?;
        let mut cards = Vec::with_capacity(count);
        for _ in 0..count {
            cards.push(self.deck.draw()?);
        }
        self.state.start_street(stage, &cards);
        Ok(())
    }

    fn showdown(&mut self) -> Result<(), GameError> {
        self.state.set_stage(Stage::Showdown);
        self.notify_stage();
        let hands = match self.reveal_hands() {
            Ok(hands) => hands,
            Err(e) => {
                self.abort_hand(&e);
                return Err(e);
            }
        };

        let contributions: Vec<u32> = self.state.players().iter().map(|p| p.total_bet()).collect();
        let live: Vec<bool> = self.state.players().iter().map(|p| p.is_live()).collect();
        let pots = PotManager::build(self.config.pot_mode, &contributions, &live);
        let awards = pots
            .pots()
            .iter()
            .filter(|pot| pot.amount > 0)
            .map(|pot| {
                let contenders: Vec<&ShowdownHand> = hands
                    .iter()
                    .filter(|h| pot.eligible.contains(&h.seat))
                    .collect();
                let winners = match contenders.iter().map(|h| h.strength).max() {
                    Some(best) => contenders
                        .iter()
                        .filter(|h| h.strength == best)
                        .map(|h| h.seat)
                        .collect(),
                    None => pot.eligible.clone(),
                };
                PotAward::split(pot.amount, winners)
            })
            .collect();
        self.finish_hand(awards, hands, false);
        Ok(())
    }

    fn reveal_hands(&self) -> Result<Vec<ShowdownHand>, GameError> {
        let community = self.state.community();
        let mut hands = Vec::new();
        for (seat, p) in self.state.players().iter().enumerate() {
            if !p.is_live() {
                continue;
            }
            let Some(hole) = p.hole_cards() else {
                continue;
            };
            let mut cards = hole.to_vec();
            cards.extend_from_slice(community);
            let best = best_hand(&cards)?;
            hands.push(ShowdownHand {
                seat,
                player_id: p.id(),
                hole,
                strength: best.strength,
                cards: best.cards,
                description: best.strength.describe(),
            });
        }
        Ok(hands)
    }

    fn award_uncontested(&mut self, winner: usize) {
        let award = PotAward::split(self.state.pot(), vec![winner]);
        self.finish_hand(vec![award], Vec::new(), true);
    }

    /// Pays every award, closes the hand record and returns to idle.
    fn finish_hand(&mut self, awards: Vec<PotAward>, showdown: Vec<ShowdownHand>, uncontested: bool) {
        let pot = self.state.pot();
        for award in &awards {
            for &seat in &award.winners {
                self.state.award(seat, award.paid_to(seat));
            }
        }
        self.state.clear_contributions();
        self.state.set_stage(Stage::Idle);

        let result = RoundResult {
            hand_no: self.hands_played,
            pot,
            awards,
            showdown,
            community: self.state.community().to_vec(),
            uncontested,
        };
        let winners = result.winners();
        info!(
            hand = result.hand_no,
            pot,
            winners = ?winners,
            board = %format_cards(&result.community),
            "round ended"
        );

        if let Some(mut record) = self.record.take() {
            record.board = result.community.clone();
            record.payouts = winners
                .iter()
                .map(|&seat| Payout {
                    seat,
                    player_id: self.state.player(seat).map(|p| p.id()).unwrap_or_default(),
                    amount: result.paid_to(seat),
                })
                .collect();
            record.result = Some(describe_result(&result));
            if !uncontested {
                let split = result.awards.first().is_some_and(|a| a.winners.len() > 1);
                let notes = if split {
                    Some("split pot".to_string())
                } else {
                    result
                        .showdown
                        .iter()
                        .find(|h| winners.first() == Some(&h.seat))
                        .map(|h| h.description.clone())
                };
                record.showdown = Some(ShowdownInfo {
                    winners: winners.clone(),
                    notes,
                });
            }
            self.last_record = Some(record);
        }

        for &seat in &winners {
            self.notify_bet(seat);
        }
        self.notify_stage();
        for listener in &mut self.listeners {
            listener.on_round_ended(&result);
        }
        self.last_result = Some(result);
    }

    /// Returns every committed chip and drops the hand.
    fn abort_hand(&mut self, error: &GameError) {
        warn!(hand = self.hands_played, %error, "hand aborted, refunding bets");
        let refunds: Vec<u32> = self.state.players().iter().map(|p| p.total_bet()).collect();
        for (seat, amount) in refunds.into_iter().enumerate() {
            self.state.award(seat, amount);
        }
        self.state.clear_contributions();
        self.state.set_stage(Stage::Idle);
        self.record = None;
        self.notify_stage();
    }

    fn notify_stage(&mut self) {
        let stage = self.state.stage();
        let community = self.state.community();
        for listener in &mut self.listeners {
            listener.on_stage_changed(stage, community);
        }
    }

    fn notify_bet(&mut self, seat: usize) {
        let Some(p) = self.state.player(seat) else {
            return;
        };
        let (bet, chips) = (p.bet(), p.chips());
        for listener in &mut self.listeners {
            listener.on_player_bet_changed(seat, bet, chips);
        }
    }
}

fn describe_result(result: &RoundResult) -> String {
    let winners = result.winners();
    match winners.as_slice() {
        [] => format!("pot {} unclaimed", result.pot),
        [seat] if result.uncontested => {
            format!("seat {} wins {} uncontested", seat, result.pot)
        }
        [seat] => format!("seat {} wins {}", seat, result.pot),
        seats => {
            let list: Vec<String> = seats.iter().map(|s| s.to_string()).collect();
            format!("seats {} split {}", list.join(", "), result.pot)
        }
    }
}
