use serde::{Deserialize, Serialize};

/// How contributions are turned into awardable pots at the end of a hand.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PotMode {
    /// One pool for everything. A short all-in can win chips it never
    /// matched; this mirrors the simple home-game model.
    #[default]
    SinglePool,
    /// Main pot plus side pots, each contestable only by the live players
    /// who paid into it.
    SidePots,
}

/// A slice of the pot and the seats that can win it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pot {
    pub amount: u32,
    pub eligible: Vec<usize>,
}

/// Result of splitting one pot among its winners.
///
/// Every winner receives `share`; the first winner in seat order also
/// receives `remainder`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PotAward {
    pub amount: u32,
    pub winners: Vec<usize>,
    pub share: u32,
    pub remainder: u32,
}

impl PotAward {
    pub fn split(amount: u32, winners: Vec<usize>) -> Self {
        let n = winners.len().max(1) as u32;
        Self {
            amount,
            share: amount / n,
            remainder: amount % n,
            winners,
        }
    }

    /// Chips paid to `seat` by this award.
    pub fn paid_to(&self, seat: usize) -> u32 {
        match self.winners.iter().position(|&w| w == seat) {
            Some(0) => self.share + self.remainder,
            Some(_) => self.share,
            None => 0,
        }
    }
}

/// Layers per-seat contributions into a main pot and side pots.
///
/// ```
/// use holdem_engine::pot::PotManager;
///
/// // seat 0 is all-in for 50, seats 1 and 2 put in 100
/// let pm = PotManager::from_contributions([50, 100, 100]);
/// assert_eq!(pm.main_pot(), 150);
/// assert_eq!(pm.side_pots(), vec![100]);
/// assert_eq!(pm.total(), 250);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PotManager {
    pots: Vec<Pot>,
}

impl PotManager {
    /// Every contributing seat is treated as live.
    pub fn from_contributions<I: IntoIterator<Item = u32>>(contributions: I) -> Self {
        let contributions: Vec<u32> = contributions.into_iter().collect();
        let live = vec![true; contributions.len()];
        Self::layered(&contributions, &live)
    }

    /// One pot holding everything, contestable by all live seats.
    pub fn single(contributions: &[u32], live: &[bool]) -> Self {
        let amount = contributions.iter().sum();
        let eligible = live_seats(live);
        Self {
            pots: vec![Pot { amount, eligible }],
        }
    }

    /// Splits contributions at every distinct contribution level. Folded
    /// seats pay into the layers but are never eligible. A layer nobody live
    /// reached is folded into the pot below it.
    pub fn layered(contributions: &[u32], live: &[bool]) -> Self {
        let mut levels: Vec<u32> = contributions.iter().copied().filter(|&c| c > 0).collect();
        levels.sort_unstable();
        levels.dedup();

        let mut pots: Vec<Pot> = Vec::new();
        let mut prev = 0u32;
        for level in levels {
            let amount: u32 = contributions
                .iter()
                .map(|&c| c.min(level) - c.min(prev))
                .sum();
            let eligible: Vec<usize> = contributions
                .iter()
                .enumerate()
                .filter(|&(seat, &c)| c >= level && live.get(seat).copied().unwrap_or(false))
                .map(|(seat, _)| seat)
                .collect();
            prev = level;

            let merge = pots
                .last()
                .is_some_and(|last| eligible.is_empty() || last.eligible == eligible);
            if merge {
                if let Some(last) = pots.last_mut() {
                    last.amount += amount;
                }
            } else if eligible.is_empty() {
                pots.push(Pot {
                    amount,
                    eligible: live_seats(live),
                });
            } else {
                pots.push(Pot { amount, eligible });
            }
        }
        Self { pots }
    }

    pub fn build(mode: PotMode, contributions: &[u32], live: &[bool]) -> Self {
        match mode {
            PotMode::SinglePool => Self::single(contributions, live),
            PotMode::SidePots => Self::layered(contributions, live),
        }
    }

    pub fn pots(&self) -> &[Pot] {
        &self.pots
    }

    pub fn main_pot(&self) -> u32 {
        self.pots.first().map(|p| p.amount).unwrap_or(0)
    }

    pub fn side_pots(&self) -> Vec<u32> {
        self.pots.iter().skip(1).map(|p| p.amount).collect()
    }

    pub fn total(&self) -> u32 {
        self.pots.iter().map(|p| p.amount).sum()
    }
}

fn live_seats(live: &[bool]) -> Vec<usize> {
    live.iter()
        .enumerate()
        .filter(|(_, l)| **l)
        .map(|(seat, _)| seat)
        .collect()
}
