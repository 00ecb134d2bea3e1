//! Computer opponents for the `play` and `deal` commands.
//!
//! A [`Policy`] sees a [`Decision`] (the seat's own cards plus public table
//! state) and picks a [`PlayerAction`]. Policies never see other seats' hole
//! cards.

use holdem_engine::cards::Card;
use holdem_engine::engine::Engine;
use holdem_engine::equity::EquityEstimator;
use holdem_engine::game::Stage;
use holdem_engine::hand::{Category, best_hand};
use holdem_engine::player::PlayerAction;

use crate::cli::Ai;

/// What a seat knows when it is asked to act.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    pub seat: usize,
    pub hole: [Card; 2],
    pub community: Vec<Card>,
    pub stage: Stage,
    pub pot: u32,
    pub to_call: u32,
    /// Smallest legal raise target
    pub min_raise_to: u32,
    /// What the seat already has in front of it this street
    pub bet: u32,
    pub stack: u32,
    /// Other players still holding cards
    pub opponents: usize,
}

impl Decision {
    /// Builds the decision for `seat`; `None` when the seat holds no cards.
    pub fn from_engine(engine: &Engine, seat: usize) -> Option<Self> {
        let player = engine.players().get(seat)?;
        let hole = player.hole_cards()?;
        let opponents = engine
            .players()
            .iter()
            .enumerate()
            .filter(|(s, p)| *s != seat && p.is_live())
            .count();
        Some(Self {
            seat,
            hole,
            community: engine.community().to_vec(),
            stage: engine.stage(),
            pot: engine.pot(),
            to_call: engine.to_call(seat),
            min_raise_to: engine.min_raise_to(),
            bet: player.bet(),
            stack: player.chips(),
            opponents,
        })
    }

    /// The cheapest action that keeps the seat in the hand for free, or a fold.
    pub fn passive(&self) -> PlayerAction {
        if self.to_call == 0 {
            PlayerAction::Check
        } else {
            PlayerAction::Fold
        }
    }

    /// Raise to `target` if the stack covers it, otherwise call.
    fn raise_or_call(&self, target: u32) -> PlayerAction {
        let target = target.max(self.min_raise_to);
        if target.saturating_sub(self.bet) <= self.stack {
            PlayerAction::Raise(target)
        } else if self.to_call == 0 {
            PlayerAction::Check
        } else {
            PlayerAction::Call
        }
    }
}

pub trait Policy {
    fn decide(&mut self, decision: &Decision) -> PlayerAction;

    fn name(&self) -> &str;
}

pub fn create_policy(ai: Ai, seed: u64) -> Box<dyn Policy> {
    match ai {
        Ai::Baseline => Box::new(BaselinePolicy),
        Ai::Equity => Box::new(EquityPolicy::new(seed, 200)),
        Ai::Station => Box::new(CallingStation),
    }
}

/// Rule-based player: a preflop chart, then made-hand strength and pot odds.
#[derive(Debug, Clone, Copy, Default)]
pub struct BaselinePolicy;

impl BaselinePolicy {
    /// Starting hand strength on a 0-10 scale.
    pub fn preflop_strength(hole: [Card; 2]) -> u8 {
        let (r1, r2) = (hole[0].rank.value(), hole[1].rank.value());
        let (high, low) = if r1 >= r2 { (r1, r2) } else { (r2, r1) };
        let suited = hole[0].suit == hole[1].suit;
        let pick = |s: u8, o: u8| if suited { s } else { o };

        if high == low {
            return match high {
                13..=14 => 10,
                11..=12 => 9,
                10 => 8,
                9 => 7,
                8 => 6,
                7 => 5,
                _ => 4,
            };
        }
        match (high, low) {
            (14, 13) => pick(10, 8),
            (14, 12) => pick(8, 7),
            (14, 11) => pick(7, 6),
            (14, 10) => pick(6, 5),
            (14, _) => pick(5, 4),
            (13, 12) => pick(7, 6),
            (13, 11) => pick(6, 5),
            (13, 10) => pick(5, 4),
            (12, 11) => pick(6, 5),
            (12, 10) => pick(5, 4),
            _ if suited && high - low <= 2 => {
                if high >= 9 {
                    5
                } else {
                    4
                }
            }
            _ if high >= 11 && low >= 9 => 4,
            _ => 2,
        }
    }

    /// Made-hand strength on a 0-10 scale; `None` before the flop.
    pub fn postflop_strength(hole: [Card; 2], community: &[Card]) -> Option<u8> {
        if community.len() < 3 {
            return None;
        }
        let mut cards = hole.to_vec();
        cards.extend_from_slice(community);
        let strength = best_hand(&cards).ok()?.strength;
        let base = match strength.category {
            Category::HighCard => 1,
            Category::OnePair => 3,
            Category::TwoPair => 5,
            Category::ThreeOfAKind => 6,
            Category::Straight => 7,
            Category::Flush => 8,
            Category::FullHouse => 9,
            Category::FourOfAKind | Category::StraightFlush | Category::RoyalFlush => 10,
        };
        let kicker_boost = u8::from(strength.kickers[0] >= 12);
        Some((base + kicker_boost).min(10))
    }

    fn pot_odds(pot: u32, to_call: u32) -> f32 {
        if to_call == 0 {
            return 1.0;
        }
        pot as f32 / (pot + to_call) as f32
    }

    fn act_on(strength: u8, d: &Decision) -> PlayerAction {
        if d.to_call == 0 {
            return match strength {
                9..=10 => d.raise_or_call(d.bet + (d.pot * 2 / 3).max(1)),
                7..=8 => d.raise_or_call(d.bet + (d.pot / 2).max(1)),
                _ => PlayerAction::Check,
            };
        }
        if d.to_call >= d.stack {
            return if strength >= 7 {
                PlayerAction::AllIn
            } else {
                PlayerAction::Fold
            };
        }
        let odds = Self::pot_odds(d.pot, d.to_call);
        match strength {
            9..=10 => d.raise_or_call(d.bet + d.to_call + d.pot / 2),
            7..=8 => PlayerAction::Call,
            5..=6 if odds >= 0.3 || d.to_call <= d.pot / 4 => PlayerAction::Call,
            3..=4 if odds >= 0.4 || d.to_call <= d.pot / 6 => PlayerAction::Call,
            _ => PlayerAction::Fold,
        }
    }
}

impl Policy for BaselinePolicy {
    fn decide(&mut self, d: &Decision) -> PlayerAction {
        let strength = match d.stage {
            Stage::PreFlop => Self::preflop_strength(d.hole),
            _ => match Self::postflop_strength(d.hole, &d.community) {
                Some(s) => s,
                None => return d.passive(),
            },
        };
        Self::act_on(strength, d)
    }

    fn name(&self) -> &str {
        "baseline"
    }
}

/// Acts on simulated win probability against the live opponents.
#[derive(Debug)]
pub struct EquityPolicy {
    estimator: EquityEstimator,
    simulations: u32,
}

impl EquityPolicy {
    pub fn new(seed: u64, simulations: u32) -> Self {
        Self {
            estimator: EquityEstimator::new(seed),
            simulations: simulations.max(1),
        }
    }
}

impl Policy for EquityPolicy {
    fn decide(&mut self, d: &Decision) -> PlayerAction {
        let opponents = d.opponents.max(1);
        let equity = match self
            .estimator
            .estimate(d.hole, &d.community, opponents, self.simulations)
        {
            Ok(report) => report.equity(),
            Err(_) => return d.passive(),
        };
        // fair share of the pot with this many players in
        let fair = 1.0 / (opponents + 1) as f64;
        let price = if d.to_call == 0 {
            0.0
        } else {
            d.to_call as f64 / (d.pot + d.to_call) as f64
        };

        if equity > fair * 1.8 {
            if d.to_call >= d.stack {
                return PlayerAction::AllIn;
            }
            return d.raise_or_call(d.bet + d.to_call + d.pot.max(1));
        }
        if d.to_call == 0 {
            PlayerAction::Check
        } else if equity >= price {
            PlayerAction::Call
        } else {
            PlayerAction::Fold
        }
    }

    fn name(&self) -> &str {
        "equity"
    }
}

/// Never folds and never raises.
#[derive(Debug, Clone, Copy, Default)]
pub struct CallingStation;

impl Policy for CallingStation {
    fn decide(&mut self, d: &Decision) -> PlayerAction {
        if d.to_call == 0 {
            PlayerAction::Check
        } else {
            PlayerAction::Call
        }
    }

    fn name(&self) -> &str {
        "station"
    }
}
