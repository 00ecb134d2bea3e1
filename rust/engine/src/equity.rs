//! Monte-Carlo equity estimation.
//!
//! Each simulation deals the unknown cards from a private deck: two hole
//! cards per opponent and whatever the board is still missing. The hero's
//! best hand is then compared with every opponent's. There is no error bound;
//! more simulations is the only accuracy control.

use std::cmp::Ordering;
use std::collections::HashSet;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cards::Card;
use crate::deck::Deck;
use crate::errors::GameError;
use crate::hand::best_hand;

/// How a simulated tie counts toward equity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TiePolicy {
    /// A tie is not a win: `wins / simulations`. Reads slightly low.
    #[default]
    Loss,
    /// A tie is half a win: `(wins + ties / 2) / simulations`.
    Split,
}

/// Outcome counts of one estimation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquityReport {
    pub wins: u64,
    pub ties: u64,
    pub losses: u64,
    pub policy: TiePolicy,
}

impl EquityReport {
    pub fn simulations(&self) -> u64 {
        self.wins + self.ties + self.losses
    }

    /// Win probability in `[0, 1]` under the report's tie policy.
    pub fn equity(&self) -> f64 {
        let total = self.simulations() as f64;
        if total == 0.0 {
            return 0.0;
        }
        match self.policy {
            TiePolicy::Loss => self.wins as f64 / total,
            TiePolicy::Split => (self.wins as f64 + 0.5 * self.ties as f64) / total,
        }
    }

    pub fn tie_rate(&self) -> f64 {
        let total = self.simulations() as f64;
        if total == 0.0 {
            0.0
        } else {
            self.ties as f64 / total
        }
    }
}

/// Seeded Monte-Carlo estimator.
///
/// ```
/// use holdem_engine::cards::parse_cards;
/// use holdem_engine::equity::EquityEstimator;
///
/// let hole = parse_cards("AS AH").unwrap();
/// let mut est = EquityEstimator::new(42);
/// let report = est.estimate([hole[0], hole[1]], &[], 1, 200).unwrap();
/// assert_eq!(report.simulations(), 200);
/// assert!(report.equity() > 0.5);
/// ```
#[derive(Debug)]
pub struct EquityEstimator {
    rng: ChaCha20Rng,
    policy: TiePolicy,
}

impl EquityEstimator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha20Rng::seed_from_u64(seed),
            policy: TiePolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: TiePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> TiePolicy {
        self.policy
    }

    pub fn set_policy(&mut self, policy: TiePolicy) {
        self.policy = policy;
    }

    pub fn estimate(
        &mut self,
        hole: [Card; 2],
        community: &[Card],
        opponents: usize,
        simulations: u32,
    ) -> Result<EquityReport, GameError> {
        if community.len() > 5 {
            return Err(GameError::InvalidCards(format!(
                "at most 5 community cards, got {}",
                community.len()
            )));
        }
        let mut known: Vec<Card> = hole.to_vec();
        known.extend_from_slice(community);
        let unique: HashSet<&Card> = known.iter().collect();
        if unique.len() != known.len() {
            return Err(GameError::InvalidCards("duplicate known card".into()));
        }
        if opponents == 0 {
            return Err(GameError::InvalidConfiguration(
                "need at least one opponent".into(),
            ));
        }
        if simulations == 0 {
            return Err(GameError::InvalidConfiguration(
                "need at least one simulation".into(),
            ));
        }
        let missing_board = 5 - community.len();
        let needed = opponents * 2 + missing_board;
        if needed > 52 - known.len() {
            return Err(GameError::InvalidConfiguration(format!(
                "{} opponents need {} unknown cards, only {} remain",
                opponents,
                needed,
                52 - known.len()
            )));
        }

        let mut deck = Deck::without(&known, self.rng.random());
        let mut report = EquityReport {
            wins: 0,
            ties: 0,
            losses: 0,
            policy: self.policy,
        };
        let mut opponent_holes: Vec<[Card; 2]> = Vec::with_capacity(opponents);
        let mut board: Vec<Card> = Vec::with_capacity(5);

        for _ in 0..simulations {
            deck.reshuffle_remaining();
            opponent_holes.clear();
            for _ in 0..opponents {
                opponent_holes.push([deck.draw()?, deck.draw()?]);
            }
            board.clear();
            board.extend_from_slice(community);
            for _ in 0..missing_board {
                board.push(deck.draw()?);
            }

            let hero = best_hand(&seven(hole, &board))?.strength;
            let mut tied = false;
            let mut beaten = false;
            for opp in &opponent_holes {
                let villain = best_hand(&seven(*opp, &board))?.strength;
                match villain.cmp(&hero) {
                    Ordering::Greater => {
                        beaten = true;
                        break;
                    }
                    Ordering::Equal => tied = true,
                    Ordering::Less => {}
                }
            }
            if beaten {
                report.losses += 1;
            } else if tied {
                report.ties += 1;
            } else {
                report.wins += 1;
            }
        }

        debug!(
            opponents,
            simulations,
            wins = report.wins,
            ties = report.ties,
            equity = report.equity(),
            "equity estimated"
        );
        Ok(report)
    }
}

fn seven(hole: [Card; 2], board: &[Card]) -> Vec<Card> {
    let mut v = Vec::with_capacity(7);
    v.extend_from_slice(&hole);
    v.extend_from_slice(board);
    v
}
